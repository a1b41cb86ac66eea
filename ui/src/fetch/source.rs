//! Where feature collections come from.
//!
//! The explorer only needs "give me the collection behind this URL". `DataClient`
//! is the real implementation; tests plug in canned sources.

use api::{DataClient, FeatureCollection, FetchError, Url};

use super::controller::{FetchTicket, SessionId};

#[allow(async_fn_in_trait)]
pub trait FeatureSource {
    async fn fetch(&self, url: Url) -> Result<FeatureCollection, FetchError>;
}

impl FeatureSource for DataClient {
    async fn fetch(&self, url: Url) -> Result<FeatureCollection, FetchError> {
        DataClient::fetch(self, url).await
    }
}

/// Runs the request for one ticket and tags the outcome with its session.
pub async fn run_ticket<S: FeatureSource>(
    source: &S,
    ticket: FetchTicket,
) -> (SessionId, Result<FeatureCollection, FetchError>) {
    let outcome = source.fetch(ticket.url).await;
    (ticket.session, outcome)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use api::BoundingBox;
    use futures::executor::block_on;

    use super::*;
    use crate::fetch::controller::{Completion, FetchController, FetchState};

    struct Canned {
        body: &'static str,
        requested: RefCell<Vec<String>>,
    }

    impl FeatureSource for Canned {
        async fn fetch(&self, url: Url) -> Result<FeatureCollection, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            FeatureCollection::from_json(self.body)
        }
    }

    #[test]
    fn ticket_round_trip_through_source() {
        let source = Canned {
            body: r#"{"type":"FeatureCollection","features":[]}"#,
            requested: RefCell::new(Vec::new()),
        };
        let mut controller = FetchController::new("http://localhost:8000");
        controller.update_viewport(BoundingBox::new(9.0, 45.0, 9.1, 45.1));
        let ticket = controller.begin().unwrap();
        let expected_url = ticket.url.to_string();

        let (session, outcome) = block_on(run_ticket(&source, ticket));
        assert_eq!(controller.complete(session, outcome), Completion::Published);
        assert_eq!(controller.state(), &FetchState::Loaded { session });
        assert_eq!(source.requested.borrow().as_slice(), &[expected_url]);
    }

    #[test]
    fn decode_failure_is_reported_for_the_session() {
        let source = Canned {
            body: "<html>502 Bad Gateway</html>",
            requested: RefCell::new(Vec::new()),
        };
        let mut controller = FetchController::new("http://localhost:8000");
        let ticket = controller.begin().unwrap();
        let (session, outcome) = block_on(run_ticket(&source, ticket));
        assert!(matches!(outcome, Err(FetchError::Decode(_))));
        assert_eq!(controller.complete(session, outcome), Completion::Failed);
    }
}
