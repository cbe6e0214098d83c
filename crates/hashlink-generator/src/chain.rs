use crate::encoder::CodeEncoder;
use crate::hasher::HashStage;
use hashlink_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use hashlink_core::ShortenerError;

/// Code length used when none is configured.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// A candidate code together with the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub stage: HashStage,
    pub code: String,
}

/// An ordered list of hash stages producing candidate codes for a URL.
///
/// Candidates are a pure function of the URL: the chain holds no state, so
/// iterating twice yields the same sequence, and the first stage is always
/// tried first. Implementations are pure generators that don't interact
/// with storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashChain {
    stages: Vec<HashStage>,
    code_length: usize,
}

impl HashChain {
    /// Creates a chain over `stages` emitting codes of `code_length` symbols.
    pub fn new(stages: Vec<HashStage>, code_length: usize) -> Result<Self, ShortenerError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&code_length) {
            return Err(ShortenerError::InvalidInput(format!(
                "code length must be between {MIN_LENGTH} and {MAX_LENGTH}, got {code_length}"
            )));
        }
        if stages.is_empty() {
            return Err(ShortenerError::InvalidInput(
                "hash chain needs at least one stage".to_string(),
            ));
        }
        Ok(Self {
            stages,
            code_length,
        })
    }

    /// The rolling hash followed by the SHA-256 fallback.
    pub fn with_length(code_length: usize) -> Result<Self, ShortenerError> {
        Self::new(vec![HashStage::Rolling, HashStage::Sha256], code_length)
    }

    /// Number of candidates produced per URL.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Lazily yields one candidate per stage, in chain order.
    pub fn candidates<'a>(&'a self, url: &'a str) -> impl Iterator<Item = Candidate> + 'a {
        self.stages.iter().map(move |stage| Candidate {
            stage: *stage,
            code: CodeEncoder::encode(stage.digest(url, self.code_length), self.code_length),
        })
    }
}

impl Default for HashChain {
    fn default() -> Self {
        Self {
            stages: vec![HashStage::Rolling, HashStage::Sha256],
            code_length: DEFAULT_CODE_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashlink_core::ShortCode;

    fn codes(chain: &HashChain, url: &str) -> Vec<String> {
        chain.candidates(url).map(|c| c.code).collect()
    }

    #[test]
    fn default_chain_produces_known_codes() {
        let chain = HashChain::default();
        assert_eq!(
            codes(&chain, "https://example.com"),
            vec!["AADTpwh4", "EAaArVRs"]
        );
    }

    #[test]
    fn candidates_follow_stage_order() {
        let chain = HashChain::default();
        let stages: Vec<_> = chain
            .candidates("https://example.com")
            .map(|c| c.stage)
            .collect();
        assert_eq!(stages, vec![HashStage::Rolling, HashStage::Sha256]);
    }

    #[test]
    fn candidates_are_restartable() {
        let chain = HashChain::default();
        let url = "https://getone.com";
        assert_eq!(codes(&chain, url), codes(&chain, url));
    }

    #[test]
    fn candidates_are_valid_short_codes() {
        for length in MIN_LENGTH..=MAX_LENGTH {
            let chain = HashChain::with_length(length).unwrap();
            for candidate in chain.candidates("https://example.com/some/path?x=1") {
                assert_eq!(candidate.code.len(), length);
                assert!(ShortCode::is_valid(&candidate.code));
            }
        }
    }

    #[test]
    fn configured_length_is_respected() {
        let chain = HashChain::with_length(12).unwrap();
        assert_eq!(
            codes(&chain, "https://example.com"),
            vec!["AAAAAADTpwh4", "EAaArVRs5qV3"]
        );
    }

    #[test]
    fn first_stage_collides_second_does_not() {
        let chain = HashChain::default();
        let first = codes(&chain, "https://example.com/az");
        let second = codes(&chain, "https://example.com/bE");

        assert_eq!(first[0], "AACpOhpe");
        assert_eq!(first[0], second[0]);
        assert_eq!(first[1], "y3ZHw4rQ");
        assert_eq!(second[1], "jH0NKEo4");
    }

    #[test]
    fn rejects_out_of_range_length() {
        assert!(HashChain::with_length(5).is_err());
        assert!(HashChain::with_length(13).is_err());
    }

    #[test]
    fn rejects_empty_chain() {
        assert!(HashChain::new(Vec::new(), 8).is_err());
    }

    #[test]
    fn single_stage_chain() {
        let chain = HashChain::new(vec![HashStage::Sha256], 8).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(codes(&chain, "https://example.com"), vec!["EAaArVRs"]);
    }
}
