use crate::error::{CountError, CountResult};
use crate::matrix::CountMatrix;
use crate::report::{NormalizeReport, ScaledSample};
use log::info;

/// Rescale every sample column so each sample holds `1 / n_samples` of the grand total.
///
/// A cell becomes `trunc(cell * scale)` with
/// `scale = (1 / n_samples) / (column_sum / total_sum)`. The product is evaluated as
/// `cell * total_sum / (n_samples * column_sum)` in integer arithmetic, which truncates exactly
/// where the floating point form could land just below a whole number.
pub fn normalize(matrix: &CountMatrix) -> CountResult<(CountMatrix, NormalizeReport)> {
    let n_samples = matrix.n_samples();

    if n_samples == 0 {
        return Err(CountError::config("count matrix has no sample columns"));
    }

    let column_sums = matrix.column_sums()?;

    if let Some(j) = column_sums.iter().position(|&s| s == 0) {
        return Err(CountError::Computation {
            sample: matrix.samples[j].clone(),
            reason: "sample has zero total reads".to_string(),
        });
    }

    let total_sum: u128 = column_sums.iter().map(|&s| s as u128).sum();
    let expected_fraction = 1.0 / n_samples as f64;

    let mut normalized = matrix.clone();

    for row in normalized.rows.iter_mut() {
        for (j, (cell, &column_sum)) in row.counts.iter_mut().zip(&column_sums).enumerate() {
            let reads = *cell;
            *cell = scale_cell(reads, total_sum, n_samples, column_sum).ok_or_else(|| {
                CountError::Computation {
                    sample: matrix.samples[j].clone(),
                    reason: format!("scaling {reads} of {column_sum} reads overflows"),
                }
            })?;
        }
    }

    let scaled_sums = normalized.column_sums()?;

    let samples = matrix
        .samples
        .iter()
        .zip(column_sums.iter().zip(&scaled_sums))
        .map(|(name, (&before, &after))| {
            let fraction = before as f64 / total_sum as f64;
            let scale = expected_fraction / fraction;
            info!(
                "{}: {} reads ({:.4} of total), scale factor {:.4}, {} reads after scaling",
                name, before, fraction, scale, after
            );
            ScaledSample {
                name: name.clone(),
                reads_before: before,
                reads_after: after,
                scale_factor: scale,
            }
        })
        .collect();

    Ok((
        normalized,
        NormalizeReport {
            total_reads: total_sum,
            samples,
        },
    ))
}

// `None` when the intermediate product leaves u128. The quotient itself is at most
// `total_sum / n_samples`, which never exceeds the largest column sum.
fn scale_cell(cell: u64, total_sum: u128, n_samples: usize, column_sum: u64) -> Option<u64> {
    let scaled = (cell as u128).checked_mul(total_sum)? / (n_samples as u128 * column_sum as u128);
    u64::try_from(scaled).ok()
}
