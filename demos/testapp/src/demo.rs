//! A small bilingual site used by the `render-page` command.

use feincms3_rs_content_editor::Placement;

use crate::models::{Article, Category, Page, PagePlugin};

/// Pages, their plugins, and articles.
#[derive(Debug, Clone)]
pub struct Site {
    pub pages: Vec<Page>,
    pub plugins: Vec<PagePlugin>,
    pub articles: Vec<Article>,
}

pub fn site() -> Site {
    let pages = vec![
        Page::new(1, "Home", "/en/")
            .template_key("with-sidebar")
            .menu("main"),
        Page::new(2, "Blog", "/en/blog/")
            .parent(1)
            .template_key("with-sidebar")
            .menu("main")
            .application("blog"),
        Page::new(3, "Publications", "/en/publications/")
            .parent(1)
            .menu("footer")
            .application("publications"),
        Page::new(4, "Startseite", "/de/").language("de"),
        Page::new(5, "Blog", "/de/blog/")
            .parent(4)
            .language("de")
            .application("blog"),
    ];

    let plugins = vec![
        PagePlugin::html(1, Placement::new(1, "main", 10), "<h1>Welcome</h1>"),
        PagePlugin::external(
            2,
            Placement::new(1, "main", 20),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        ),
        PagePlugin::html(3, Placement::new(1, "sidebar", 10), "<p>Follow us</p>"),
        PagePlugin::external(4, Placement::new(2, "main", 10), "https://vimeo.com/76979871"),
        PagePlugin::html(5, Placement::new(4, "main", 10), "<h1>Willkommen</h1>"),
    ];

    let articles = vec![
        Article::new(1, "We are hiring", Category::Publications),
        Article::new(2, "Notes from the road", Category::Blog),
    ];

    Site {
        pages,
        plugins,
        articles,
    }
}
