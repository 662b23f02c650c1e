// Translation port - the bilingual-generation collaborator.
//
// Submissions arrive in one language; the portal stores both. The provider
// behind this trait is an opaque, possibly-slow, possibly-failing external
// call. On hard failure the whole submission aborts (nothing persists); on
// soft failure (unparsable output) providers degrade to a source-language-
// only structure via `BilingualPost::from_source`.

use async_trait::async_trait;

use crate::core::board::{Bilingual, Language};

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    Request(String),
    #[error("translation service returned no content")]
    Empty,
}

/// The four-field structure the collaborator returns.
#[derive(Debug, Clone, PartialEq)]
pub struct BilingualPost {
    pub title: Bilingual,
    pub description: Bilingual,
}

impl BilingualPost {
    /// Degraded result: the source text fills its own language, the other
    /// side stays empty. Used when the provider output is unusable and by
    /// the mirror provider in keyless deployments (which fills both sides).
    pub fn from_source(title: &str, description: &str, source: Language) -> Self {
        match source {
            Language::Korean => Self {
                title: Bilingual {
                    kr: title.to_string(),
                    cn: String::new(),
                },
                description: Bilingual {
                    kr: description.to_string(),
                    cn: String::new(),
                },
            },
            Language::Chinese => Self {
                title: Bilingual {
                    kr: String::new(),
                    cn: title.to_string(),
                },
                description: Bilingual {
                    kr: String::new(),
                    cn: description.to_string(),
                },
            },
        }
    }
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Produces the bilingual title/description pair for a draft.
    async fn bilingual_post(
        &self,
        title: &str,
        description: &str,
        source: Language,
    ) -> Result<BilingualPost, TranslationError>;
}
