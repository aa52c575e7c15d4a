use crate::{
    Field, FormatError, ParamsDocument, Record,
    filter::{Direction, FilterState, RecordListView},
};
use std::path::{Path, PathBuf};

/// The editing session: at most one loaded document and the list view over its
/// records. Loading replaces both together; a failed load keeps what was there.
#[derive(Debug, Default)]
pub struct Session {
    document: Option<ParamsDocument>,
    view: RecordListView,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> Option<&ParamsDocument> {
        self.document.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.document.as_ref().is_some_and(|d| d.dirty)
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.document.as_ref()?.source_path.as_deref()
    }

    pub fn view(&self) -> &RecordListView {
        &self.view
    }

    pub fn records(&self) -> &[Record] {
        self.view.records()
    }

    pub fn load_path(&mut self, path: &Path) -> anyhow::Result<()> {
        let (document, records) = ParamsDocument::load_path(path)?;
        log::info!("loaded {} parameters from {}", records.len(), path.display());
        self.replace(document, records);
        Ok(())
    }

    /// Swap in a freshly loaded document. The previous filter query is
    /// re-applied to the new records.
    pub fn replace(&mut self, document: ParamsDocument, records: Vec<Record>) {
        let query = self.view.filter().query.clone();
        self.document = Some(document);
        self.view = RecordListView::new(records);
        self.view.set_query(&query);
    }

    /// Commit an edited display string to one cell. Returns whether the record
    /// changed. `Id` edits and out-of-range rows are silent no-ops.
    pub fn commit_edit(
        &mut self,
        row: usize,
        field: Field,
        display: &str,
    ) -> Result<bool, FormatError> {
        let Some(document) = self.document.as_mut() else {
            return Ok(false);
        };
        let Some(record) = self.view.record_mut(row) else {
            return Ok(false);
        };

        let changed = record.apply_display(field, display).inspect_err(|e| {
            log::warn!("rejected edit of {} on row {row}: {e}", field.key());
        })?;
        if changed {
            log::debug!("row {row} {} <- {display:?}", field.key());
            document.mark_dirty();
        }
        Ok(changed)
    }

    pub fn set_query(&mut self, query: &str) -> &FilterState {
        self.view.set_query(query)
    }

    /// Step the filter cursor; yields the record index now under it.
    pub fn advance(&mut self, direction: Direction) -> Option<usize> {
        self.view.advance(direction)?;
        self.view.current_match()
    }

    pub fn counter_text(&self) -> String {
        self.view.counter_text()
    }

    /// Save to the document's own path.
    pub fn save(&mut self) -> anyhow::Result<PathBuf> {
        let path = self
            .current_path()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow::anyhow!("no file to save to"))?;
        self.save_as(&path)?;
        Ok(path)
    }

    /// Save to `path`, which becomes the document's path from then on.
    pub fn save_as(&mut self, path: &Path) -> anyhow::Result<()> {
        let document = self
            .document
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("no document loaded"))?;
        document.save_to_path(path, self.view.records())?;
        log::info!("saved {} parameters to {}", self.view.len(), path.display());
        Ok(())
    }
}
