//! Grouping plugins by region.
//!
//! [`Contents`] sorts an object's plugins into the regions of its template.
//! Plugins whose region is not part of the template are kept aside instead
//! of being dropped, so editors can still find them.

use std::collections::HashMap;

use crate::plugin::Plugin;
use crate::regions::Region;

/// Plugins of one parent object, grouped per region and ordered.
#[derive(Debug, Clone)]
pub struct Contents<P> {
    regions: Vec<Region>,
    contents: HashMap<String, Vec<P>>,
    unknown: Vec<P>,
}

impl<P: Plugin> Contents<P> {
    /// Creates empty contents for `regions`.
    pub fn new(regions: &[Region]) -> Self {
        Self {
            regions: regions.to_vec(),
            contents: regions.iter().map(|r| (r.key.clone(), Vec::new())).collect(),
            unknown: Vec::new(),
        }
    }

    /// Adds a plugin to its region, keeping the region sorted by `ordering`.
    ///
    /// Plugins with equal ordering stay in insertion order.
    pub fn add(&mut self, plugin: P) {
        match self.contents.get_mut(plugin.region()) {
            Some(items) => {
                let pos = items.partition_point(|p| p.ordering() <= plugin.ordering());
                items.insert(pos, plugin);
            }
            None => self.unknown.push(plugin),
        }
    }

    /// Returns the plugins of `region`, or an empty slice for unknown regions.
    pub fn get(&self, region: &str) -> &[P] {
        self.contents.get(region).map_or(&[], Vec::as_slice)
    }

    /// Returns plugins whose region is not part of the template.
    pub fn unknown_region_contents(&self) -> &[P] {
        &self.unknown
    }

    /// Returns the regions these contents were built for.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Iterates over `(region, plugins)` in template order.
    pub fn iter(&self) -> impl Iterator<Item = (&Region, &[P])> {
        self.regions.iter().map(|r| (r, self.get(&r.key)))
    }

    /// Total number of plugins in known regions.
    pub fn len(&self) -> usize {
        self.contents.values().map(Vec::len).sum()
    }

    /// Returns `true` if no known region holds a plugin.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P: Plugin + Clone> Contents<P> {
    /// Fills empty inherited regions with the contents of `other`.
    ///
    /// Regions that already hold plugins, or that do not inherit, are left
    /// untouched.
    pub fn inherit_regions(&mut self, other: &Self) {
        for region in &self.regions {
            if !region.inherited || !self.get(&region.key).is_empty() {
                continue;
            }
            let inherited = other.get(&region.key).to_vec();
            self.contents.insert(region.key.clone(), inherited);
        }
    }
}

impl<P: Plugin> Extend<P> for Contents<P> {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for plugin in iter {
            self.add(plugin);
        }
    }
}

/// Builds the contents of the object `item_id`.
///
/// `plugins` may hold plugins of several parents; only those belonging to
/// `item_id` are used. `inherit_from` lists ancestor ids, closest first, whose
/// plugins fill inherited regions that are still empty.
pub fn contents_for_item<P>(
    item_id: i64,
    regions: &[Region],
    plugins: &[P],
    inherit_from: &[i64],
) -> Contents<P>
where
    P: Plugin + Clone,
{
    let collect = |parent_id: i64| {
        let mut contents = Contents::new(regions);
        contents.extend(plugins.iter().filter(|p| p.parent_id() == parent_id).cloned());
        contents
    };

    let mut contents = collect(item_id);
    for &ancestor in inherit_from {
        contents.inherit_regions(&collect(ancestor));
    }
    contents
}
