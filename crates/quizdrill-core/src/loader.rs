//! Bank assembly from one or more sources.
//!
//! The first source in the list is mandatory; every later one is optional
//! and merely logged when unavailable. Sources are fetched concurrently,
//! but the bank always concatenates them in list order.

use futures::future::join_all;

use crate::error::{LoadError, SourceError};
use crate::model::{Bank, Question};
use crate::parser::{parse_source, ParseFailure};
use crate::traits::TextSource;

/// A bank assembled from sources, plus everything that went sideways on
/// the way: records that failed to parse and optional sources that were
/// unavailable.
#[derive(Debug)]
pub struct LoadedBank {
    /// The concatenated bank.
    pub bank: Bank,
    /// Malformed records that were skipped, across all loaded sources.
    pub skipped: Vec<ParseFailure>,
    /// Optional sources that could not be fetched.
    pub missing: Vec<String>,
}

/// Fetch and parse a single source.
pub async fn load_source(
    source: &dyn TextSource,
    source_id: &str,
) -> Result<(Vec<Question>, Vec<ParseFailure>), SourceError> {
    let text = source.fetch_text(source_id).await?;
    Ok(parse_source(&text, source_id))
}

/// Fetch every source and assemble the bank.
///
/// All fetches run concurrently; the argument order of `join_all` fixes the
/// concatenation order regardless of completion order. A failed first
/// source aborts the load with [`LoadError::SourceUnavailable`]; a failed
/// later source is recorded in `missing` and skipped.
pub async fn load_bank(
    source: &dyn TextSource,
    source_ids: &[String],
) -> Result<LoadedBank, LoadError> {
    let fetches = source_ids.iter().map(|id| load_source(source, id));
    let outcomes = join_all(fetches).await;

    let mut bank = Bank::default();
    let mut skipped = Vec::new();
    let mut missing = Vec::new();

    for (position, (source_id, outcome)) in source_ids.iter().zip(outcomes).enumerate() {
        match outcome {
            Ok((questions, failures)) => {
                tracing::debug!(
                    "source '{}': {} question(s), {} skipped record(s)",
                    source_id,
                    questions.len(),
                    failures.len()
                );
                bank.questions.extend(questions);
                skipped.extend(failures);
            }
            Err(error) if position == 0 => {
                return Err(LoadError::SourceUnavailable {
                    source_id: source_id.clone(),
                    source: error,
                });
            }
            Err(error) => {
                tracing::warn!("skipping optional source '{}': {}", source_id, error);
                missing.push(source_id.clone());
            }
        }
    }

    tracing::info!(
        "bank assembled: {} question(s) from {} source(s), {} missing",
        bank.len(),
        source_ids.len() - missing.len(),
        missing.len()
    );
    Ok(LoadedBank {
        bank,
        skipped,
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct StubSource {
        texts: HashMap<String, String>,
    }

    impl StubSource {
        fn new(entries: &[(&str, &str)]) -> Self {
            let texts = entries
                .iter()
                .map(|(id, text)| (id.to_string(), text.to_string()))
                .collect();
            Self { texts }
        }
    }

    #[async_trait]
    impl TextSource for StubSource {
        fn name(&self) -> &str {
            "stub"
        }

        async fn fetch_text(&self, source_id: &str) -> Result<String, SourceError> {
            self.texts
                .get(source_id)
                .cloned()
                .ok_or_else(|| SourceError::NotFound(source_id.to_string()))
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|id| id.to_string()).collect()
    }

    #[tokio::test]
    async fn missing_first_source_is_fatal() {
        let source = StubSource::new(&[("extra.csv", "header\nQ1,P,a,b,c,d,1,x\n")]);
        let err = load_bank(&source, &ids(&["main.csv", "extra.csv"]))
            .await
            .unwrap_err();
        let LoadError::SourceUnavailable { source_id, .. } = err;
        assert_eq!(source_id, "main.csv");
    }

    #[tokio::test]
    async fn missing_later_source_is_skipped() {
        let source = StubSource::new(&[("main.csv", "header\nQ1,P,a,b,c,d,1,x\n")]);
        let loaded = load_bank(&source, &ids(&["main.csv", "extra.csv"]))
            .await
            .unwrap();
        assert_eq!(loaded.bank.len(), 1);
        assert_eq!(loaded.missing, vec!["extra.csv"]);
    }

    #[tokio::test]
    async fn bank_keeps_source_list_order() {
        let source = StubSource::new(&[
            ("a.csv", "header\nA1,P,a,b,c,d,1,x\nA2,P,a,b,c,d,1,x\n"),
            ("b.csv", "header\nB1,P,a,b,c,d,1,x\n"),
        ]);
        let loaded = load_bank(&source, &ids(&["a.csv", "b.csv"])).await.unwrap();
        let order: Vec<&str> = loaded
            .bank
            .questions
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(order, ["A1", "A2", "B1"]);
    }

    #[tokio::test]
    async fn skipped_records_are_collected_across_sources() {
        let source = StubSource::new(&[
            ("a.csv", "header\nA1,P,a,b,c,d,1,x\nbad\n"),
            ("b.csv", "header\nB1,P,a,b,c,d,7,x\n"),
        ]);
        let loaded = load_bank(&source, &ids(&["a.csv", "b.csv"])).await.unwrap();
        assert_eq!(loaded.bank.len(), 1);
        assert_eq!(loaded.skipped.len(), 2);
        assert_eq!(loaded.skipped[0].source_id, "a.csv");
        assert_eq!(loaded.skipped[1].source_id, "b.csv");
    }

    #[tokio::test]
    async fn empty_source_list_yields_an_empty_bank() {
        let source = StubSource::new(&[]);
        let loaded = load_bank(&source, &[]).await.unwrap();
        assert!(loaded.bank.is_empty());
        assert!(loaded.skipped.is_empty());
        assert!(loaded.missing.is_empty());
    }

    #[tokio::test]
    async fn header_only_source_yields_an_empty_bank() {
        let source = StubSource::new(&[("main.csv", "id,prompt,a,b,c,d,answer,explanation\n")]);
        let loaded = load_bank(&source, &ids(&["main.csv"])).await.unwrap();
        assert!(loaded.bank.is_empty());
    }
}
