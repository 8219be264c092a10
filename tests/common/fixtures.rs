//! Shared builders for pipeline integration tests.

use pinpoint::model::{Candidate, FaqId};
use pinpoint::pins::PinTable;
use pinpoint::retriever::MockSearchBackend;

pub fn faq_id(n: u128) -> FaqId {
    FaqId::new(uuid::Uuid::from_u128(n))
}

pub fn candidate(id: FaqId, score: f32) -> Candidate {
    Candidate {
        faq_id: id,
        slug: format!("faq-{id}"),
        question: format!("question for {id}"),
        answer_md: format!("answer for {id}"),
        score,
    }
}

pub fn pin_table(rules: &[(&str, FaqId)]) -> PinTable {
    PinTable::compile(rules).expect("fixture pins must compile")
}

/// A backend scripted with one strong answer per query.
pub fn scripted_backend(responses: &[(&str, FaqId, f32)]) -> MockSearchBackend {
    let backend = MockSearchBackend::new();
    for (query, id, score) in responses {
        backend.respond_with(
            query,
            vec![candidate(*id, *score), candidate(faq_id(0xdead), score * 0.3)],
        );
    }
    backend
}
