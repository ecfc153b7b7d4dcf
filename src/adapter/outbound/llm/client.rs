//! LLM client test doubles.


#[cfg(test)]
mod internal_tests {
    use super::tests::{FailingLlm, MockLlm, RecordingLlm};
    use crate::port::outbound::llm::Llm;

    #[tokio::test]
    async fn mock_llm_returns_response() {
        let llm = MockLlm::new("SELECT 1");
        let result = llm.complete("test").await.unwrap();
        assert_eq!(result, "SELECT 1");
    }

    #[tokio::test]
    async fn recording_llm_keeps_last_prompt() {
        let llm = RecordingLlm::new("SELECT 1");
        assert!(llm.last_prompt().is_none());
        llm.complete("first").await.unwrap();
        llm.complete("second").await.unwrap();
        assert_eq!(llm.last_prompt().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn failing_llm_errors() {
        assert!(FailingLlm.complete("x").await.is_err());
    }
}
