use tera::Context;

use super::renderer::ViewRenderer;
use crate::auth::Session;
use crate::error::Result;

/// Details of the signed-in user, or a sign-in hint
pub struct SessionView<'a> {
    session: Option<&'a Session>,
    provider: &'a str,
}

impl<'a> SessionView<'a> {
    pub fn new(session: Option<&'a Session>, provider: &'a str) -> Self {
        Self { session, provider }
    }
}

impl ViewRenderer for SessionView<'_> {
    fn template(&self) -> &'static str {
        "session.html"
    }

    fn populate(&self, context: &mut Context) -> Result<()> {
        context.insert("session", &self.session);
        context.insert("provider", self.provider);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionUser;
    use crate::template::TemplateEngine;
    use crate::view::renderer::PageMeta;

    const META: PageMeta<'static> = PageMeta {
        app_name: "sitestack",
        title: "User Info",
        description: None,
        home_path: "/",
    };

    #[test]
    fn test_signed_in() {
        let session = Session {
            user: SessionUser {
                name: "Octo <Cat>".to_string(),
                email: Some("octocat@github.com".to_string()),
                image: None,
            },
            provider: "github".to_string(),
        };
        let html = SessionView::new(Some(&session), "github")
            .render(&TemplateEngine::new().unwrap(), &META)
            .unwrap();

        assert!(html.contains("Octo &lt;Cat&gt;"));
        assert!(html.contains("octocat@github.com"));
        assert!(!html.contains("Not signed in"));
    }

    #[test]
    fn test_anonymous() {
        let html = SessionView::new(None, "github")
            .render(&TemplateEngine::new().unwrap(), &META)
            .unwrap();

        assert!(html.contains("Not signed in. Sign in with github"));
    }
}
