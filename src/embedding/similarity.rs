/// Cosine similarity of two vectors. Zero-norm or mismatched inputs score `0.0`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

/// Row-wise cosine of two aligned row sets.
pub fn pairwise_cosine(rows: &[Vec<f32>], others: &[Vec<f32>]) -> Vec<f32> {
    rows.iter()
        .zip(others.iter())
        .map(|(a, b)| cosine_similarity(a, b))
        .collect()
}

/// Cosine of every row against one vector.
pub fn cosine_against(rows: &[Vec<f32>], target: &[f32]) -> Vec<f32> {
    rows.iter().map(|row| cosine_similarity(row, target)).collect()
}

/// Element-wise `|a - b| <= atol + rtol * |b|`, requiring equal lengths.
pub fn allclose(a: &[f32], b: &[f32], atol: f32, rtol: f32) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b.iter())
            .all(|(x, y)| (x - y).abs() <= atol + rtol * y.abs())
}
