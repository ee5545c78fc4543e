//! Detail Editor
//!
//! Holds a draft copy of one record. Edits touch only the draft; a save goes
//! through a `SaveGateway` and the confirmed record is merged back into the
//! owning `RecordStore`. A failed save leaves both the draft and the store
//! as they were.

use crate::domain::Editable;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::SaveGateway;
use crate::listing::Filterable;
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct DetailEditor<T: Editable> {
    original: Option<T>,
    draft: Option<T>,
}

impl<T: Editable> Default for DetailEditor<T> {
    fn default() -> Self {
        Self {
            original: None,
            draft: None,
        }
    }
}

impl<T: Editable + Filterable> DetailEditor<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing a copy of `record`.
    pub fn load(&mut self, record: &T) -> &T {
        self.original = Some(record.clone());
        self.draft.insert(record.clone())
    }

    pub fn close(&mut self) {
        self.original = None;
        self.draft = None;
    }

    pub fn draft(&self) -> Option<&T> {
        self.draft.as_ref()
    }

    /// The record as last confirmed by the backend.
    pub fn original(&self) -> Option<&T> {
        self.original.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Applies one field edit to the draft.
    pub fn edit(&mut self, edit: T::Edit) -> Option<&T> {
        let draft = self.draft.as_mut()?;
        draft.apply_edit(edit);
        Some(&*draft)
    }

    pub fn is_dirty(&self) -> bool
    where
        T: PartialEq,
    {
        self.original != self.draft
    }

    /// Sends the draft to the backend. Does not change the editor; pass the
    /// confirmed record to `confirm` on success.
    pub async fn save<G>(&self, gateway: &G) -> GatewayResult<T>
    where
        G: SaveGateway<T> + ?Sized,
    {
        let (Some(original), Some(draft)) = (&self.original, &self.draft) else {
            return Err(GatewayError::MissingField("record"));
        };
        gateway.save(original, draft).await
    }

    /// Whether the editor currently holds the record `id`.
    pub fn is_editing(&self, id: &T::Id) -> bool {
        self.original.as_ref().is_some_and(|original| &original.id() == id)
    }

    /// Adopts a backend-confirmed record and echoes it into the store.
    ///
    /// `id` is the record the save was issued for. If the editor has since
    /// moved to another record, only the store is updated.
    pub fn confirm(&mut self, id: &T::Id, confirmed: T, store: &mut RecordStore<T>) -> bool {
        if self.is_editing(id) {
            self.original = Some(confirmed.clone());
            self.draft = Some(confirmed.clone());
        }
        store.optimistic_merge(confirmed)
    }

    /// `save` followed by `confirm`.
    pub async fn save_into<G>(&mut self, gateway: &G, store: &mut RecordStore<T>) -> GatewayResult<()>
    where
        G: SaveGateway<T> + ?Sized,
    {
        let confirmed = self.save(gateway).await?;
        if let Some(id) = self.original.as_ref().map(|original| original.id()) {
            self.confirm(&id, confirmed, store);
        }
        Ok(())
    }

    /// Applies an already-confirmed change (new milestone, activity, links)
    /// to record `id`, keeping unsaved draft edits.
    ///
    /// When the editor holds another record the change goes to the store's
    /// copy of `id` only.
    pub fn commit_change(&mut self, id: &T::Id, store: &mut RecordStore<T>, change: impl Fn(&mut T)) -> bool {
        if !self.is_editing(id) {
            let Some(mut current) = store.get(id).cloned() else {
                return false;
            };
            change(&mut current);
            return store.optimistic_merge(current);
        }
        let (Some(original), Some(draft)) = (self.original.as_mut(), self.draft.as_mut()) else {
            return false;
        };
        change(original);
        change(draft);
        store.optimistic_merge(original.clone())
    }

    /// Drops unsaved edits, reloading the draft from the store's current copy.
    pub fn discard(&mut self, store: &RecordStore<T>) -> Option<&T> {
        let id = self.original.as_ref()?.id();
        if let Some(current) = store.get(&id) {
            self.original = Some(current.clone());
        }
        self.draft = self.original.clone();
        self.draft.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Milestone, MvpEdit, MvpRecord, MvpStatus};
    use crate::listing::{Page, PageRequest};
    use async_trait::async_trait;
    use std::cell::Cell;

    struct EchoGateway {
        fail: bool,
        calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl SaveGateway<MvpRecord> for EchoGateway {
        async fn save(&self, _original: &MvpRecord, draft: &MvpRecord) -> GatewayResult<MvpRecord> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(GatewayError::remote(500, b"boom"))
            } else {
                Ok(draft.clone())
            }
        }
    }

    fn store_with(records: Vec<MvpRecord>) -> RecordStore<MvpRecord> {
        let mut store = RecordStore::new(10);
        let ticket = store.begin_fetch();
        store.finish_fetch(ticket, Ok(Page::from_items(records, PageRequest::first(10))));
        store
    }

    #[test]
    fn test_edits_do_not_touch_store() {
        let store = store_with(vec![MvpRecord::new(1, "Alpha")]);
        let mut editor = DetailEditor::new();
        editor.load(&store.records()[0]);

        editor.edit(MvpEdit::Title("Beta".to_string()));
        assert!(editor.is_dirty());
        assert_eq!(editor.draft().unwrap().title, "Beta");
        assert_eq!(store.records()[0].title, "Alpha");
    }

    #[test]
    fn test_edit_without_draft_is_noop() {
        let mut editor: DetailEditor<MvpRecord> = DetailEditor::new();
        assert!(editor.edit(MvpEdit::Progress(10)).is_none());
        assert!(!editor.is_open());
    }

    #[tokio::test]
    async fn test_successful_save_merges_into_store() {
        let mut store = store_with(vec![MvpRecord::new(1, "Alpha"), MvpRecord::new(2, "Beta")]);
        let gateway = EchoGateway { fail: false, calls: Cell::new(0) };
        let mut editor = DetailEditor::new();
        editor.load(store.get(&2).unwrap());
        editor.edit(MvpEdit::Progress(100));

        editor.save_into(&gateway, &mut store).await.unwrap();

        assert_eq!(store.get(&2).unwrap().status, MvpStatus::Completed);
        assert_eq!(store.get(&1).unwrap(), &MvpRecord::new(1, "Alpha"));
        assert!(!editor.is_dirty());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft_and_store() {
        let mut store = store_with(vec![MvpRecord::new(1, "Alpha")]);
        let gateway = EchoGateway { fail: true, calls: Cell::new(0) };
        let mut editor = DetailEditor::new();
        editor.load(&store.records()[0]);
        editor.edit(MvpEdit::Title("Renamed".to_string()));

        let error = editor.save_into(&gateway, &mut store).await.unwrap_err();
        assert_eq!(error.status(), Some(500));
        assert_eq!(editor.draft().unwrap().title, "Renamed");
        assert_eq!(store.records()[0].title, "Alpha");

        // retry with the same draft
        let gateway = EchoGateway { fail: false, calls: Cell::new(0) };
        editor.save_into(&gateway, &mut store).await.unwrap();
        assert_eq!(gateway.calls.get(), 1);
        assert_eq!(store.records()[0].title, "Renamed");
    }

    #[tokio::test]
    async fn test_save_without_draft_fails_without_calling_gateway() {
        let gateway = EchoGateway { fail: false, calls: Cell::new(0) };
        let editor: DetailEditor<MvpRecord> = DetailEditor::new();
        assert_eq!(editor.save(&gateway).await, Err(GatewayError::MissingField("record")));
        assert_eq!(gateway.calls.get(), 0);
    }

    #[test]
    fn test_discard_reloads_from_store() {
        let mut store = store_with(vec![MvpRecord::new(1, "Alpha")]);
        let mut editor = DetailEditor::new();
        editor.load(&store.records()[0]);
        editor.edit(MvpEdit::Title("Scratch".to_string()));

        let mut newer = MvpRecord::new(1, "Alpha v2");
        newer.set_progress(40);
        store.optimistic_merge(newer);

        let draft = editor.discard(&store).unwrap();
        assert_eq!(draft.title, "Alpha v2");
        assert_eq!(draft.status, MvpStatus::InProgress);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_commit_change_keeps_unsaved_edits() {
        let mut store = store_with(vec![MvpRecord::new(1, "Alpha")]);
        let mut editor = DetailEditor::new();
        editor.load(&store.records()[0]);
        editor.edit(MvpEdit::Title("Unsaved".to_string()));

        assert!(editor.commit_change(&1, &mut store, |r| r.live_url = Some("https://live.example".into())));

        assert_eq!(store.records()[0].live_url.as_deref(), Some("https://live.example"));
        assert_eq!(store.records()[0].title, "Alpha");
        let draft = editor.draft().unwrap();
        assert_eq!(draft.title, "Unsaved");
        assert_eq!(draft.live_url.as_deref(), Some("https://live.example"));
    }

    #[test]
    fn test_commit_change_after_switching_records() {
        let mut store = store_with(vec![MvpRecord::new(1, "Alpha"), MvpRecord::new(2, "Beta")]);
        let mut editor = DetailEditor::new();
        editor.load(store.get(&1).unwrap());
        editor.load(store.get(&2).unwrap());
        editor.edit(MvpEdit::Title("Beta draft".to_string()));

        let late = Milestone::new("Alpha only", "", "2024-05-01", false);
        assert!(editor.commit_change(&1, &mut store, |r| r.push_milestone(late.clone())));

        assert_eq!(store.get(&1).unwrap().milestones.len(), 1);
        assert!(store.get(&2).unwrap().milestones.is_empty());
        let draft = editor.draft().unwrap();
        assert_eq!(draft.id, 2);
        assert_eq!(draft.title, "Beta draft");
        assert!(draft.milestones.is_empty());
    }

    #[test]
    fn test_late_confirm_leaves_other_draft_alone() {
        let mut store = store_with(vec![MvpRecord::new(1, "Alpha"), MvpRecord::new(2, "Beta")]);
        let mut editor = DetailEditor::new();
        editor.load(store.get(&2).unwrap());
        editor.edit(MvpEdit::Title("Beta draft".to_string()));

        let mut saved = MvpRecord::new(1, "Alpha saved");
        saved.set_progress(50);
        assert!(editor.confirm(&1, saved, &mut store));

        assert_eq!(store.get(&1).unwrap().title, "Alpha saved");
        assert_eq!(store.get(&2).unwrap().title, "Beta");
        assert_eq!(editor.draft().unwrap().title, "Beta draft");
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_commit_change_for_unknown_record_is_noop() {
        let mut store = store_with(vec![MvpRecord::new(1, "Alpha")]);
        let mut editor = DetailEditor::new();
        editor.load(store.get(&1).unwrap());

        assert!(!editor.commit_change(&9, &mut store, |r| r.title = "ghost".to_string()));
        assert_eq!(store.records().len(), 1);
        assert_eq!(editor.draft().unwrap().title, "Alpha");
    }
}
