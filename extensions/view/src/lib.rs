//! File-based view rendering for junction.
//!
//! Handlers that produce HTML render a named view inside a layout and wrap
//! the result in a `Response`. The engine here is deliberately small: a
//! layout file carries an `@content` annotation where the view is spliced
//! in, and `{{ name }}` placeholders are substituted from the parameter
//! map. Anything fancier belongs to a real template engine behind the same
//! [`View`] trait.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Contract for a view renderer.
pub trait View: Send + Sync {
    /// Render `view` with `params`, wrapped in `layout` (or the engine's
    /// default layout when `None`).
    fn render(
        &self,
        view: &str,
        params: &HashMap<String, String>,
        layout: Option<&str>,
    ) -> Result<String, ViewError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("template `{0}` not found")]
    MissingTemplate(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Renderer backed by plain files under a views directory.
///
/// Views live at `{dir}/{view}.html`, layouts at
/// `{dir}/layouts/{layout}.html`. The default layout is `main`.
pub struct FileEngine {
    views_directory: PathBuf,
    default_layout: String,
    content_annotation: String,
}

impl FileEngine {
    pub fn new(views_directory: impl Into<PathBuf>) -> Self {
        Self {
            views_directory: views_directory.into(),
            default_layout: "main".to_string(),
            content_annotation: "@content".to_string(),
        }
    }

    pub fn with_default_layout(mut self, layout: impl Into<String>) -> Self {
        self.default_layout = layout.into();
        self
    }

    fn render_file(
        &self,
        path: &Path,
        params: &HashMap<String, String>,
    ) -> Result<String, ViewError> {
        let mut output = match std::fs::read_to_string(path) {
            Ok(template) => template,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ViewError::MissingTemplate(path.display().to_string()));
            }
            Err(err) => return Err(ViewError::Io(err)),
        };
        for (name, value) in params {
            output = output.replace(&format!("{{{{ {name} }}}}"), value);
            output = output.replace(&format!("{{{{{name}}}}}"), value);
        }
        Ok(output)
    }
}

impl View for FileEngine {
    fn render(
        &self,
        view: &str,
        params: &HashMap<String, String>,
        layout: Option<&str>,
    ) -> Result<String, ViewError> {
        let layout_name = layout.unwrap_or(&self.default_layout);
        let layout_path = self
            .views_directory
            .join("layouts")
            .join(format!("{layout_name}.html"));
        let view_path = self.views_directory.join(format!("{view}.html"));

        let layout_content = self.render_file(&layout_path, &HashMap::new())?;
        let view_content = self.render_file(&view_path, params)?;

        Ok(layout_content.replace(&self.content_annotation, &view_content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_templates(templates: &[(&str, &str)]) -> (tempfile::TempDir, FileEngine) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("layouts")).unwrap();
        for (name, content) in templates {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let engine = FileEngine::new(dir.path());
        (dir, engine)
    }

    #[test]
    fn test_view_is_spliced_into_the_layout() {
        let (_dir, engine) = engine_with_templates(&[
            ("layouts/main.html", "<html><body>@content</body></html>"),
            ("hello.html", "<h1>Hello, {{ name }}!</h1>"),
        ]);

        let params = HashMap::from([("name".to_string(), "ada".to_string())]);
        let html = engine.render("hello", &params, None).unwrap();

        assert_eq!(html, "<html><body><h1>Hello, ada!</h1></body></html>");
    }

    #[test]
    fn test_unspaced_placeholders_also_substitute() {
        let (_dir, engine) = engine_with_templates(&[
            ("layouts/main.html", "@content"),
            ("terse.html", "{{name}}"),
        ]);

        let params = HashMap::from([("name".to_string(), "ada".to_string())]);
        assert_eq!(engine.render("terse", &params, None).unwrap(), "ada");
    }

    #[test]
    fn test_explicit_layout_overrides_the_default() {
        let (_dir, engine) = engine_with_templates(&[
            ("layouts/main.html", "main: @content"),
            ("layouts/bare.html", "@content"),
            ("page.html", "body"),
        ]);

        assert_eq!(
            engine.render("page", &HashMap::new(), Some("bare")).unwrap(),
            "body"
        );
        assert_eq!(
            engine.render("page", &HashMap::new(), None).unwrap(),
            "main: body"
        );
    }

    #[test]
    fn test_missing_view_is_a_typed_error() {
        let (_dir, engine) =
            engine_with_templates(&[("layouts/main.html", "@content")]);

        let err = engine.render("ghost", &HashMap::new(), None).unwrap_err();
        assert!(matches!(err, ViewError::MissingTemplate(_)));
    }

    #[test]
    fn test_missing_layout_is_a_typed_error() {
        let (_dir, engine) = engine_with_templates(&[("page.html", "body")]);

        let err = engine.render("page", &HashMap::new(), None).unwrap_err();
        assert!(matches!(err, ViewError::MissingTemplate(_)));
    }

    #[test]
    fn test_unknown_placeholders_are_left_alone() {
        let (_dir, engine) = engine_with_templates(&[
            ("layouts/main.html", "@content"),
            ("page.html", "{{ missing }}"),
        ]);

        assert_eq!(
            engine.render("page", &HashMap::new(), None).unwrap(),
            "{{ missing }}"
        );
    }
}
