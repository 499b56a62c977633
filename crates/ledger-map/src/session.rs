//! Import session state around a [`FieldMappingModel`].
//!
//! A session tracks two separate signals. "Pending changes" means the working
//! mapping differs from what was last applied. "Applied" means the user
//! explicitly applied a mapping. Mapped header names are only ever shown from
//! the applied snapshot.

use std::sync::Arc;

use tracing::{Span, info, info_span};

use ledger_model::{Catalog, SessionContext};

use crate::error::MappingError;
use crate::model::FieldMappingModel;
use crate::types::{FieldMapping, MappingPayload, MappingSummary};

/// Which header names to render for the preview table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderNames {
    /// Column headers as they appear in the uploaded file.
    #[default]
    Original,
    /// Destination labels from the last applied mapping.
    Mapped,
}

/// One user's import, owning its mapping exclusively.
#[derive(Debug, Clone)]
pub struct ImportSession {
    context: SessionContext,
    model: FieldMappingModel,
    applied: Option<FieldMapping>,
}

impl ImportSession {
    pub fn new(context: SessionContext, catalog: Arc<Catalog>) -> Self {
        Self {
            context,
            model: FieldMappingModel::new(catalog),
            applied: None,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn model(&self) -> &FieldMappingModel {
        &self.model
    }

    pub fn mapping(&self) -> &FieldMapping {
        self.model.mapping()
    }

    /// The mapping last handed to [`ImportSession::apply`], if any.
    pub fn applied(&self) -> Option<&FieldMapping> {
        self.applied.as_ref()
    }

    /// Start over with the headers of a newly uploaded file.
    pub fn load_headers<I, S>(&mut self, headers: I) -> &FieldMapping
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let _guard = self.span().entered();
        self.applied = None;
        self.model.initialize(headers)
    }

    pub fn set_mapping(
        &mut self,
        source: &str,
        destination: Option<&str>,
    ) -> Result<&FieldMapping, MappingError> {
        self.model.set_mapping(source, destination)
    }

    pub fn reset_all(&mut self) -> &FieldMapping {
        self.model.reset_all()
    }

    pub fn apply_automatic(&mut self) -> &FieldMapping {
        self.model.apply_automatic()
    }

    pub fn summary(&self) -> MappingSummary {
        self.model.summary()
    }

    /// Record the working mapping as applied and return the payload for the
    /// upload/validate/convert collaborators.
    pub fn apply(&mut self) -> MappingPayload {
        let _guard = self.span().entered();
        let snapshot = self.model.mapping().clone();
        let payload = snapshot.to_payload();
        info!(
            sources = snapshot.len(),
            mapped = snapshot.mapped_count(),
            "field mapping applied"
        );
        self.applied = Some(snapshot);
        payload
    }

    /// Whether the working mapping differs from what was last applied.
    ///
    /// Before the first apply, any mapped source counts as pending.
    pub fn has_pending_changes(&self) -> bool {
        match &self.applied {
            Some(applied) => applied != self.model.mapping(),
            None => self.model.mapped_count() > 0,
        }
    }

    pub fn is_applied(&self) -> bool {
        self.applied.is_some()
    }

    /// Header names for the preview, in source order.
    pub fn display_headers(&self, names: HeaderNames) -> Vec<String> {
        let catalog = self.model.catalog();
        self.model
            .mapping()
            .sources()
            .map(|source| {
                let mapped = match (names, &self.applied) {
                    (HeaderNames::Mapped, Some(applied)) => applied.get(source).flatten(),
                    _ => None,
                };
                match mapped {
                    Some(key) => catalog
                        .field(key)
                        .map_or_else(|| key.to_string(), |f| f.label.clone()),
                    None => source.to_string(),
                }
            })
            .collect()
    }

    fn span(&self) -> Span {
        info_span!(
            "import_session",
            user = %self.context.user.id,
            project = %self.context.project_id,
            period = %self.context.period
        )
    }
}
