//! Visitor list view state.
//!
//! Holds the current page, search term and filters, the rows of the last completed fetch
//! and the open modal. Every fetch is described by exactly one [`ListRequest`]; a search
//! or filter submission carries no page and so starts at page 1.

use crate::models::visitor::{total_pages, Paginated, Visitor, VisitorListQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Ready,
}

/// A fetch the view is waiting for. Results are matched back by `generation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub generation: u64,
    pub query: VisitorListQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Detail,
    CheckOut,
    Edit,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Detail(i64),
    ConfirmCheckOut(i64),
    ConfirmDelete(i64),
}

impl Modal {
    pub fn visitor_id(&self) -> i64 {
        match self {
            Modal::Detail(id) | Modal::ConfirmCheckOut(id) | Modal::ConfirmDelete(id) => *id,
        }
    }

    /// Modal named by the `modal` query parameter
    pub fn from_query(kind: &str, id: i64) -> Option<Self> {
        match kind {
            "detalle" => Some(Modal::Detail(id)),
            "salida" => Some(Modal::ConfirmCheckOut(id)),
            "eliminar" => Some(Modal::ConfirmDelete(id)),
            _ => None,
        }
    }

    pub fn query_name(&self) -> &'static str {
        match self {
            Modal::Detail(_) => "detalle",
            Modal::ConfirmCheckOut(_) => "salida",
            Modal::ConfirmDelete(_) => "eliminar",
        }
    }
}

/// Row as displayed in the table
#[derive(Debug)]
pub struct RowView<'a> {
    pub visitor: &'a Visitor,
    pub highlighted: bool,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone)]
pub struct VisitorListView {
    query: VisitorListQuery,
    phase: ListPhase,
    generation: u64,
    visitors: Vec<Visitor>,
    total_count: u64,
    modal: Option<Modal>,
}

impl VisitorListView {
    pub fn new(query: VisitorListQuery) -> Self {
        Self {
            query,
            phase: ListPhase::Loading,
            generation: 0,
            visitors: Vec::new(),
            total_count: 0,
            modal: None,
        }
    }

    pub fn query(&self) -> &VisitorListQuery {
        &self.query
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn visitors(&self) -> &[Visitor] {
        &self.visitors
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u64 {
        total_pages(self.total_count)
    }

    /// Enter `Loading` and describe the fetch to issue for the current query.
    pub fn begin_fetch(&mut self) -> ListRequest {
        self.generation += 1;
        self.phase = ListPhase::Loading;
        ListRequest {
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    /// Move to `page`. Pages outside `1..=total_pages` are ignored.
    pub fn set_page(&mut self, page: u64) -> Option<ListRequest> {
        if page < 1 || page > self.total_pages().max(1) {
            return None;
        }
        self.query.page = page;
        Some(self.begin_fetch())
    }

    /// Accept the result of a fetch. Results of superseded requests are dropped and
    /// `false` is returned.
    pub fn apply(&mut self, generation: u64, page: Paginated<Visitor>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "Dropping stale visitor page (generation {}, current {})",
                generation,
                self.generation
            );
            return false;
        }

        self.visitors = page.results;
        self.total_count = page.count;
        self.phase = ListPhase::Ready;

        if let Some(modal) = self.modal {
            if self.visitor(modal.visitor_id()).is_none() {
                self.modal = None;
            }
        }
        true
    }

    pub fn visitor(&self, id: i64) -> Option<&Visitor> {
        self.visitors.iter().find(|v| v.id == id)
    }

    pub fn rows(&self) -> Vec<RowView<'_>> {
        self.visitors
            .iter()
            .map(|visitor| RowView {
                visitor,
                highlighted: visitor.is_on_premises(),
                actions: Self::actions_for(visitor),
            })
            .collect()
    }

    pub fn actions_for(visitor: &Visitor) -> Vec<RowAction> {
        let mut actions = vec![RowAction::Detail];
        if visitor.is_on_premises() {
            actions.push(RowAction::CheckOut);
        }
        actions.push(RowAction::Edit);
        actions.push(RowAction::Delete);
        actions
    }

    /// Open a modal for a loaded row. A checkout confirmation is refused once the exit
    /// is recorded.
    pub fn open_modal(&mut self, modal: Modal) -> bool {
        let allowed = match self.visitor(modal.visitor_id()) {
            Some(visitor) => !matches!(modal, Modal::ConfirmCheckOut(_)) || visitor.is_on_premises(),
            None => false,
        };
        if allowed {
            self.modal = Some(modal);
        }
        allowed
    }

    pub fn modal(&self) -> Option<Modal> {
        self.modal
    }

    /// The open modal together with its visitor
    pub fn modal_visitor(&self) -> Option<(Modal, &Visitor)> {
        let modal = self.modal?;
        self.visitor(modal.visitor_id()).map(|v| (modal, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn visitor(id: i64, exit: Option<&str>) -> Visitor {
        serde_json::from_value(json!({
            "id": id,
            "nombre": "Juan Pérez",
            "documento_identidad": "1020304050",
            "motivo_visita": "visita_familiar",
            "anfitrion": 3,
            "fecha_entrada": "2024-01-01T08:00:00Z",
            "fecha_salida": exit
        }))
        .unwrap()
    }

    fn ready_view(count: u64, rows: Vec<Visitor>) -> VisitorListView {
        let mut view = VisitorListView::new(VisitorListQuery::default());
        let request = view.begin_fetch();
        assert!(view.apply(request.generation, Paginated { results: rows, count }));
        view
    }

    #[test]
    fn starts_loading_then_ready() {
        let mut view = VisitorListView::new(VisitorListQuery::default());
        assert_eq!(view.phase(), ListPhase::Loading);

        let request = view.begin_fetch();
        assert_eq!(request.query.page, 1);
        view.apply(request.generation, Paginated { results: vec![], count: 0 });
        assert_eq!(view.phase(), ListPhase::Ready);
    }

    #[test]
    fn every_valid_page_issues_one_request_for_that_page() {
        let mut view = ready_view(35, vec![visitor(1, None)]);
        assert_eq!(view.total_pages(), 4);

        for page in 1..=4 {
            let request = view.set_page(page).expect("page in range");
            assert_eq!(request.query.page, page);
            assert_eq!(view.phase(), ListPhase::Loading);
        }
        assert!(view.set_page(0).is_none());
        assert!(view.set_page(5).is_none());
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut view = ready_view(20, vec![visitor(1, None)]);
        let slow = view.set_page(2).unwrap();
        let fast = view.set_page(1).unwrap();

        assert!(view.apply(fast.generation, Paginated { results: vec![visitor(7, None)], count: 1 }));
        assert!(!view.apply(slow.generation, Paginated { results: vec![visitor(8, None)], count: 20 }));
        assert_eq!(view.visitors()[0].id, 7);
        assert_eq!(view.total_count(), 1);
    }

    #[test]
    fn open_visits_are_highlighted_with_one_checkout_action() {
        let view = ready_view(2, vec![visitor(1, None), visitor(2, Some("2024-01-01T10:00:00Z"))]);
        let rows = view.rows();

        assert!(rows[0].highlighted);
        assert_eq!(rows[0].actions.iter().filter(|a| **a == RowAction::CheckOut).count(), 1);

        assert!(!rows[1].highlighted);
        assert_eq!(rows[1].actions.iter().filter(|a| **a == RowAction::CheckOut).count(), 0);
    }

    #[test]
    fn checkout_modal_only_for_open_visits() {
        let mut view = ready_view(2, vec![visitor(1, None), visitor(2, Some("2024-01-01T10:00:00Z"))]);

        assert!(!view.open_modal(Modal::ConfirmCheckOut(2)));
        assert!(view.modal().is_none());

        assert!(view.open_modal(Modal::ConfirmCheckOut(1)));
        assert_eq!(view.modal_visitor().map(|(_, v)| v.id), Some(1));

        assert!(view.open_modal(Modal::Detail(2)));
        assert!(!view.open_modal(Modal::ConfirmDelete(99)));
        assert_eq!(view.modal(), Some(Modal::Detail(2)));
    }

    #[test]
    fn checkout_then_refetch_clears_highlight() {
        let mut view = ready_view(1, vec![visitor(1, None)]);
        assert!(view.open_modal(Modal::ConfirmCheckOut(1)));

        let request = view.begin_fetch();
        view.apply(
            request.generation,
            Paginated { results: vec![visitor(1, Some("2024-01-01T10:00:00Z"))], count: 1 },
        );

        let rows = view.rows();
        assert!(!rows[0].highlighted);
        assert!(!rows[0].actions.contains(&RowAction::CheckOut));
        assert_eq!(view.total_pages(), 1);
        assert!(!view.open_modal(Modal::ConfirmCheckOut(1)));
    }
}
