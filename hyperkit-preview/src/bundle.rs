//! Source files → a single servable `index.html`.
//!
//! There is no JSX compiler here. The output inlines the project stylesheet
//! and a tiny `createElement`/`render` shim that draws a placeholder app, so
//! the preview loads without any network fetches.

use crate::resolver::INDEX_HTML;
use crate::store::ProjectFile;

const REQUIRED: &[&str] = &[INDEX_HTML, "src/main.jsx", "src/App.jsx"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BundleError {
    #[error("Missing required files: {}", .0.join(", "))]
    MissingFiles(Vec<String>),
}

/// Bundle a generated project into its served form.
pub fn bundle(files: &[ProjectFile]) -> Result<Vec<ProjectFile>, BundleError> {
    let find = |path: &str| files.iter().find(|f| f.path == path);

    let missing: Vec<String> = REQUIRED
        .iter()
        .filter(|&&p| find(p).is_none())
        .map(|p| p.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(BundleError::MissingFiles(missing));
    }

    let title = find(INDEX_HTML)
        .and_then(|f| extract_title(&f.content))
        .unwrap_or("HyperionKit Project");
    let css = find("src/styles.css")
        .map(|f| f.content.as_str())
        .unwrap_or(DEFAULT_CSS);

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title}</title>
  <style>
{css}
  </style>
</head>
<body>
  <div id="root"></div>
  <script>
{RUNTIME_JS}
  </script>
</body>
</html>"#
    );

    Ok(vec![ProjectFile::new(INDEX_HTML, html)])
}

fn extract_title(html: &str) -> Option<&str> {
    let start = html.find("<title>")? + "<title>".len();
    let len = html[start..].find("</title>")?;
    let title = html[start..start + len].trim();
    (!title.is_empty()).then_some(title)
}

const DEFAULT_CSS: &str = r#"body {
  margin: 0;
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Helvetica Neue', sans-serif;
  -webkit-font-smoothing: antialiased;
}

#root {
  min-height: 100vh;
  display: flex;
  flex-direction: column;
}"#;

const RUNTIME_JS: &str = r#"const React = {
  createElement: function(tag, props, ...children) {
    if (typeof tag === 'function') {
      return tag({ ...props, children: children.filter(c => c != null) });
    }
    const element = document.createElement(tag);
    if (props) {
      Object.keys(props).forEach(key => {
        if (key === 'className') {
          element.className = props[key];
        } else if (key === 'onClick') {
          element.onclick = props[key];
        } else if (key === 'style' && typeof props[key] === 'object') {
          Object.assign(element.style, props[key]);
        } else if (key !== 'children') {
          element.setAttribute(key, props[key]);
        }
      });
    }
    children.filter(c => c != null).forEach(child => {
      if (typeof child === 'string' || typeof child === 'number') {
        element.appendChild(document.createTextNode(child));
      } else if (child && child.nodeType) {
        element.appendChild(child);
      }
    });
    return element;
  }
};

const ReactDOM = {
  render: function(element, container) {
    container.innerHTML = '';
    if (element && element.nodeType) {
      container.appendChild(element);
    }
  }
};

function App() {
  return React.createElement('div', { style: { padding: '20px', fontFamily: 'Arial, sans-serif' } },
    React.createElement('h1', null, document.title),
    React.createElement('p', null, 'Your React app is running successfully!'),
    React.createElement('div', { style: { padding: '10px', backgroundColor: '#f0f0f0', borderRadius: '5px' } },
      React.createElement('h3', null, 'Generated Project'),
      React.createElement('p', null, 'This is a dynamically generated React application.')
    )
  );
}

function renderApp() {
  const root = document.getElementById('root');
  if (root) {
    ReactDOM.render(App(), root);
  }
}

document.addEventListener('DOMContentLoaded', renderApp);"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::{ProjectGenerator, TemplateGenerator};

    #[test]
    fn bundles_generated_project() {
        let files = TemplateGenerator.generate("Build a swap app");
        let out = bundle(&files).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].path, "index.html");
        assert!(out[0].content.contains("<title>Build a swap app</title>"));
        assert!(out[0].content.contains(".components-grid"));
        assert!(out[0].content.contains("ReactDOM.render"));
    }

    #[test]
    fn default_css_without_stylesheet() {
        let files = vec![
            ProjectFile::new("index.html", "<html></html>"),
            ProjectFile::new("src/main.jsx", ""),
            ProjectFile::new("src/App.jsx", ""),
        ];
        let out = bundle(&files).unwrap();
        assert!(out[0].content.contains("#root"));
        assert!(out[0].content.contains("<title>HyperionKit Project</title>"));
    }

    #[test]
    fn missing_files_are_reported() {
        let files = vec![ProjectFile::new("index.html", "<html></html>")];
        let err = bundle(&files).unwrap_err();
        assert_eq!(
            err,
            BundleError::MissingFiles(vec!["src/main.jsx".into(), "src/App.jsx".into()])
        );
        assert_eq!(err.to_string(), "Missing required files: src/main.jsx, src/App.jsx");
    }
}
