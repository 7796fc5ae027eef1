use std::path::Path;
use log::warn;
use crate::ffprobe::ExternalDecoder;
use crate::tags;

/// The two playability signals and the verdict drawn from them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playability {
    /// Metadata layer found a positive stream duration
    pub metadata: bool,
    /// External decoder verdict, `None` when no decoder is available
    pub external: Option<bool>,
}

impl Playability {
    /// Final verdict: the external decoder overrides the metadata signal when it has an opinion
    pub fn verdict(&self) -> bool {
        combine(self.metadata, self.external)
    }

    /// The signals were both present and disagreed
    pub fn disputed(&self) -> bool {
        self.external.is_some_and(|ext| ext != self.metadata)
    }
}

/// Combine the metadata signal with the optional external decoder signal
pub fn combine(metadata: bool, external: Option<bool>) -> bool {
    external.unwrap_or(metadata)
}

/// Run both probes against a non-empty file
pub async fn check(path: &Path, decoder: Option<&ExternalDecoder>) -> Playability {
    let metadata = tags::metadata_probe(path);
    let external = match decoder {
        Some(decoder) => Some(decoder.verdict(path).await),
        None => None,
    };

    let result = Playability { metadata, external };
    if result.disputed() {
        warn!(
            "Probes disagree on {}: metadata says {}, decoder says {}; using decoder",
            path.display(),
            describe(metadata),
            describe(!metadata)
        );
    }
    result
}

fn describe(playable: bool) -> &'static str {
    if playable {
        "playable"
    } else {
        "broken"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_metadata_stands_alone_without_decoder() {
        assert!(combine(true, None));
        assert!(!combine(false, None));
    }

    proptest! {
        /// When the decoder has an opinion, it is the verdict
        #[test]
        fn test_external_signal_overrides(metadata in any::<bool>(), external in any::<bool>()) {
            let p = Playability { metadata, external: Some(external) };
            prop_assert_eq!(p.verdict(), external);
            prop_assert_eq!(p.disputed(), metadata != external);
        }
    }
}
