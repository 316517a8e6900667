//! ResumeRenderer: binds a canonical [`Resume`] to the two-column template
//! and hands the resulting document tree to a backend.
//!
//! Rendering is a pure function of (document, template). The template is
//! immutable after construction, so one renderer is shared across requests
//! behind an `Arc`.

pub mod document;
pub mod html;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod template;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::resume::{Resume, MAX_SKILL_LEVEL};
use document::ResumeLayout;
use template::Template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    Pdf,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutput {
    Pdf(Vec<u8>),
    Html(String),
}

impl RenderOutput {
    pub fn format(&self) -> RenderFormat {
        match self {
            RenderOutput::Pdf(_) => RenderFormat::Pdf,
            RenderOutput::Html(_) => RenderFormat::Html,
        }
    }
}

/// The renderer could not produce a complete document. No partial output is
/// ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("document binding failed: {0}")]
    Binding(String),

    #[error("rasterization failed: {0}")]
    Rasterize(String),

    #[error("rendering timed out after {0}s")]
    TimedOut(u64),
}

/// Turns a bound document tree into final bytes.
pub trait RenderBackend: Send + Sync {
    fn format(&self) -> RenderFormat;

    fn rasterize(
        &self,
        layout: &ResumeLayout,
        template: &Template,
    ) -> Result<RenderOutput, RenderError>;
}

pub struct ResumeRenderer {
    template: Template,
    pdf: Arc<dyn RenderBackend>,
    html: Arc<dyn RenderBackend>,
}

impl ResumeRenderer {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            pdf: Arc::new(pdf::PdfBackend),
            html: Arc::new(html::HtmlBackend),
        }
    }

    #[cfg(test)]
    pub fn with_pdf_backend(mut self, backend: Arc<dyn RenderBackend>) -> Self {
        self.pdf = backend;
        self
    }

    /// Binds `doc` to the template without rasterizing.
    pub fn layout(&self, doc: &Resume) -> Result<ResumeLayout, RenderError> {
        check_binding(doc)?;
        Ok(layout::build_layout(doc, &self.template))
    }

    pub fn render(&self, doc: &Resume, format: RenderFormat) -> Result<RenderOutput, RenderError> {
        let backend = match format {
            RenderFormat::Pdf => &self.pdf,
            RenderFormat::Html => &self.html,
        };
        if backend.format() != format {
            return Err(RenderError::Rasterize(format!(
                "{format:?} request routed to a {:?} backend",
                backend.format()
            )));
        }

        let layout = self.layout(doc)?;
        let output = backend.rasterize(&layout, &self.template)?;
        if output.format() != format {
            return Err(RenderError::Rasterize(format!(
                "backend produced {:?} output for a {format:?} request",
                output.format()
            )));
        }
        debug!(
            "rendered {format:?}: {} sections",
            layout.sections().count()
        );
        Ok(output)
    }

    /// Runs [`render`](Self::render) on the blocking pool under `limit`.
    ///
    /// The call is atomic: on timeout the in-flight result is discarded and
    /// [`RenderError::TimedOut`] is returned.
    pub async fn render_blocking(
        self: Arc<Self>,
        doc: Resume,
        format: RenderFormat,
        limit: Duration,
    ) -> Result<RenderOutput, RenderError> {
        let task = tokio::task::spawn_blocking(move || self.render(&doc, format));
        match tokio::time::timeout(limit, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(RenderError::Rasterize(format!(
                "render task failed: {join_err}"
            ))),
            Err(_) => Err(RenderError::TimedOut(limit.as_secs())),
        }
    }
}

/// Cheap guard over the schema invariants the layout relies on.
fn check_binding(doc: &Resume) -> Result<(), RenderError> {
    if let Some(skill) = doc.skills.iter().find(|s| s.level > MAX_SKILL_LEVEL) {
        return Err(RenderError::Binding(format!(
            "skill '{}' has level {} outside 0..={MAX_SKILL_LEVEL}",
            skill.name, skill.level
        )));
    }
    Ok(())
}
