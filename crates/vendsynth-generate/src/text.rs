//! Realistic text values backed by the `fake` crate.

use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, PostCode, StreetName};
use fake::faker::company::en::{Buzzword, BuzzwordMiddle, BuzzwordTail};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::Words;
use fake::faker::name::en::{FirstName, LastName};
use rand::RngCore;

use crate::errors::GenerationError;

/// Source of human-looking text. Implementations draw from the supplied RNG
/// only, so a seeded RNG yields reproducible text.
pub trait TextProvider {
    fn first_name(&self, rng: &mut dyn RngCore) -> Result<String, GenerationError>;

    fn last_name(&self, rng: &mut dyn RngCore) -> Result<String, GenerationError>;

    /// Full display name.
    fn name(&self, rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        let first = self.first_name(rng)?;
        let last = self.last_name(rng)?;
        Ok(format!("{first} {last}"))
    }

    /// Email address, on `domain` when one is given.
    fn email(
        &self,
        domain: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError>;

    fn street_address(&self, rng: &mut dyn RngCore) -> Result<String, GenerationError>;

    /// Single-line postal address.
    fn address(&self, rng: &mut dyn RngCore) -> Result<String, GenerationError>;

    /// Capitalised sentence of exactly `word_count` words, without a period.
    fn sentence(&self, word_count: usize, rng: &mut dyn RngCore)
    -> Result<String, GenerationError>;

    /// Short marketing phrase, used for product names.
    fn catch_phrase(&self, rng: &mut dyn RngCore) -> Result<String, GenerationError>;
}

/// [`TextProvider`] over the `fake` crate's English locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeTextProvider;

impl TextProvider for FakeTextProvider {
    fn first_name(&self, rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        Ok(FirstName().fake_with_rng(rng))
    }

    fn last_name(&self, rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        Ok(LastName().fake_with_rng(rng))
    }

    fn email(
        &self,
        domain: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError> {
        match domain {
            Some(domain) => {
                if domain.is_empty() {
                    return Err(GenerationError::Provider(
                        "email domain must not be empty".to_string(),
                    ));
                }
                let user: String = Username().fake_with_rng(rng);
                Ok(format!("{}@{domain}", user.to_lowercase()))
            }
            None => Ok(SafeEmail().fake_with_rng(rng)),
        }
    }

    fn street_address(&self, rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        let number: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);
        Ok(format!("{number} {street}"))
    }

    fn address(&self, rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        let street = self.street_address(rng)?;
        let city: String = CityName().fake_with_rng(rng);
        let post_code: String = PostCode().fake_with_rng(rng);
        Ok(format!("{street}, {city} {post_code}"))
    }

    fn sentence(
        &self,
        word_count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError> {
        let words: Vec<String> = Words(word_count..word_count + 1).fake_with_rng(rng);
        Ok(capitalize(&words.join(" ")))
    }

    fn catch_phrase(&self, rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        let head: String = Buzzword().fake_with_rng(rng);
        let middle: String = BuzzwordMiddle().fake_with_rng(rng);
        let tail: String = BuzzwordTail().fake_with_rng(rng);
        Ok(capitalize(&format!("{head} {middle} {tail}")))
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn sentence_has_requested_word_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let sentence = FakeTextProvider.sentence(6, &mut rng).expect("sentence");
        assert_eq!(sentence.split_whitespace().count(), 6);
        assert!(sentence.chars().next().is_some_and(char::is_uppercase));
    }

    #[test]
    fn email_uses_given_domain() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let email = FakeTextProvider
            .email(Some("vendtechinc.com"), &mut rng)
            .expect("email");
        assert!(email.ends_with("@vendtechinc.com"), "{email}");

        let err = FakeTextProvider
            .email(Some(""), &mut rng)
            .expect_err("empty domain");
        assert!(matches!(err, GenerationError::Provider(_)));
    }

    #[test]
    fn same_seed_same_text() {
        let mut left = ChaCha8Rng::seed_from_u64(9);
        let mut right = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(
            FakeTextProvider.address(&mut left).expect("address"),
            FakeTextProvider.address(&mut right).expect("address")
        );
    }
}
