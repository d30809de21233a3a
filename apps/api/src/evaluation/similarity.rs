//! Similarity Scorer — cosine similarity of two texts' embeddings, as a 0–100 score.

use thiserror::Error;
use tracing::warn;

use crate::embedding::Embedder;
use crate::errors::AppError;

#[derive(Debug, Error, PartialEq)]
pub enum SimilarityError {
    #[error("Embedding dimensions differ ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Cosine similarity is undefined for a zero-norm embedding")]
    ZeroNorm,
}

/// dot(a, b) / (‖a‖ · ‖b‖), accumulated in f64.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let (dot, norm_a, norm_b) = a.iter().zip(b).fold(
        (0.0_f64, 0.0_f64, 0.0_f64),
        |(dot, na, nb), (x, y)| {
            let (x, y) = (f64::from(*x), f64::from(*y));
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(SimilarityError::ZeroNorm);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Cosine × 100, clamped to [0, 100] and rounded to two decimals.
///
/// A zero-norm embedding scores 0.00 instead of failing the evaluation.
pub fn score_from_vectors(a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
    match cosine_similarity(a, b) {
        Ok(cosine) => Ok(round2((cosine * 100.0).clamp(0.0, 100.0))),
        Err(SimilarityError::ZeroNorm) => {
            warn!("Zero-norm embedding; similarity score defined as 0");
            Ok(0.0)
        }
        Err(e) => Err(e),
    }
}

/// Embeds resume and job description independently and scores them.
pub async fn similarity_score(
    resume_text: &str,
    jd_text: &str,
    embedder: &dyn Embedder,
) -> Result<f64, AppError> {
    let (resume_vec, jd_vec) =
        tokio::try_join!(embedder.embed(resume_text), embedder.embed(jd_text))?;
    Ok(score_from_vectors(&resume_vec, &jd_vec)?)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;

    #[test]
    fn test_parallel_vectors_are_one() {
        let cosine = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((cosine - 1.0).abs() < 1e-12, "cosine was {cosine}");
    }

    #[test]
    fn test_orthogonal_vectors_are_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_norm_is_reported() {
        assert_eq!(
            cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]),
            Err(SimilarityError::ZeroNorm)
        );
    }

    #[test]
    fn test_dimension_mismatch_is_reported() {
        assert_eq!(
            cosine_similarity(&[1.0], &[1.0, 0.0]),
            Err(SimilarityError::DimensionMismatch { left: 1, right: 2 })
        );
    }

    #[test]
    fn test_zero_norm_scores_zero() {
        assert_eq!(score_from_vectors(&[0.0; 4], &[1.0; 4]).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_still_fails_scoring() {
        assert!(score_from_vectors(&[1.0; 3], &[1.0; 4]).is_err());
    }

    #[test]
    fn test_anti_correlated_vectors_clamp_to_zero() {
        assert_eq!(score_from_vectors(&[1.0, 0.0], &[-1.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_score_is_rounded_to_two_decimals() {
        // cos = 1/sqrt(2) = 0.70710678...
        assert_eq!(score_from_vectors(&[1.0, 0.0], &[1.0, 1.0]).unwrap(), 70.71);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(74.994), 74.99);
        assert_eq!(round2(74.996), 75.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[tokio::test]
    async fn test_identical_texts_score_one_hundred() {
        let embedder = HashingEmbedder::new(HashingEmbedder::DEFAULT_DIMENSION);
        let text = "Backend engineer with Python, Django, PostgreSQL and AWS experience";
        let score = similarity_score(text, text, &embedder).await.unwrap();
        assert_eq!(score, 100.0);
    }

    #[tokio::test]
    async fn test_score_is_symmetric() {
        let embedder = HashingEmbedder::new(HashingEmbedder::DEFAULT_DIMENSION);
        let resume = "Data analyst: Excel, Tableau, SQL dashboards";
        let jd = "We need a data engineer fluent in SQL, Python and Airflow";
        let forward = similarity_score(resume, jd, &embedder).await.unwrap();
        let backward = similarity_score(jd, resume, &embedder).await.unwrap();
        assert_eq!(forward, backward);
    }

    #[tokio::test]
    async fn test_score_is_bounded() {
        let embedder = HashingEmbedder::new(32);
        let pairs = [
            ("rust", "rust"),
            ("react frontend", "kubernetes operator"),
            ("python sql aws", "python developer"),
            ("", "anything at all"),
        ];
        for (resume, jd) in pairs {
            let score = similarity_score(resume, jd, &embedder).await.unwrap();
            assert!((0.0..=100.0).contains(&score), "{resume:?}/{jd:?} scored {score}");
        }
    }

    #[tokio::test]
    async fn test_unrelated_texts_score_lower_than_related() {
        let embedder = HashingEmbedder::new(HashingEmbedder::DEFAULT_DIMENSION);
        let jd = "python developer with sql";
        let related = similarity_score("python sql developer", jd, &embedder)
            .await
            .unwrap();
        let unrelated = similarity_score("florist arranging tulips", jd, &embedder)
            .await
            .unwrap();
        assert!(related > unrelated, "{related} <= {unrelated}");
    }
}
