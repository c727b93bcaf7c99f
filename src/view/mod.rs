pub mod collection;
pub mod not_found;
pub mod page;
pub mod record;
pub mod renderer;
pub mod session;
pub mod static_page;

pub use collection::CollectionView;
pub use not_found::NotFoundView;
pub use page::{PageRenderer, RenderedPage};
pub use record::RecordView;
pub use renderer::{PageMeta, ViewRenderer};
pub use session::SessionView;
pub use static_page::{STATIC_TEMPLATES, StaticView};

/// Page templates compiled into the binary, base layout first
pub const PAGE_TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("templates/layout.html")),
    ("home.html", include_str!("templates/home.html")),
    ("contact.html", include_str!("templates/contact.html")),
    ("collection.html", include_str!("templates/collection.html")),
    ("record.html", include_str!("templates/record.html")),
    ("session.html", include_str!("templates/session.html")),
    ("not_found.html", include_str!("templates/not_found.html")),
];
