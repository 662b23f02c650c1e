// Mirror translator - no external calls.
//
// Used when no Gemini API key is configured (local development, tests).
// Both language slots get the source text, so the portal stays fully
// usable, just untranslated.

use crate::core::board::{Bilingual, Language};
use crate::core::translation::{BilingualPost, TranslationError, Translator};
use async_trait::async_trait;

pub struct MirrorTranslator;

#[async_trait]
impl Translator for MirrorTranslator {
    async fn bilingual_post(
        &self,
        title: &str,
        description: &str,
        _source: Language,
    ) -> Result<BilingualPost, TranslationError> {
        Ok(BilingualPost {
            title: Bilingual {
                kr: title.to_string(),
                cn: title.to_string(),
            },
            description: Bilingual {
                kr: description.to_string(),
                cn: description.to_string(),
            },
        })
    }
}
