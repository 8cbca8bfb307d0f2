#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("no candidate encoding produced readable text")]
    NoCandidateEncoding,
}
