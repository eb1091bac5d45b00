use serde::Deserialize;
use tracing::debug;

use super::{EPS, Stage};
use crate::error::ConfigError;
use crate::series::PriceFrame;

/// Shortest series the smoother acts on; anything below passes through.
pub const MIN_SERIES_LEN: usize = 5;

/// Smallest accepted window length.
pub const MIN_WINDOW: usize = 5;

/// Smoothing method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothingMethod {
    /// Exponential weighting with span = window.
    Ema,

    /// Local least-squares polynomial regression over a sliding window.
    Polynomial,

    /// Convolution with a symmetric Gaussian kernel, sigma = window / 4.
    Lowpass,
}

/// Smoother
///
/// Removes high-frequency noise from the raw close series while keeping
/// the output aligned index-for-index with the input.
///
/// Construction validates the window/order combination; evaluation is
/// total. A series shorter than [`MIN_SERIES_LEN`] (or shorter than the
/// effective polynomial window) is returned unchanged rather than
/// rejected, so downstream stages see the insufficient-data degrade
/// instead of an error.
#[derive(Debug, Clone)]
pub struct Smoother {
    method: SmoothingMethod,
    window: usize,
    poly_order: usize,
}

impl Smoother {
    pub fn new(
        method: SmoothingMethod,
        window: usize,
        poly_order: usize,
    ) -> Result<Self, ConfigError> {
        if window < MIN_WINDOW {
            return Err(ConfigError::WindowBelowMinimum(window));
        }

        if method == SmoothingMethod::Polynomial && window < poly_order + 2 {
            return Err(ConfigError::WindowTooSmall { window, poly_order });
        }

        Ok(Self {
            method,
            window,
            poly_order,
        })
    }

    /// Effective polynomial window: the next odd integer that can hold a
    /// fit of `poly_order`.
    fn effective_window(&self) -> usize {
        let mut wl = self.window.max(self.poly_order + 2);
        if wl % 2 == 0 {
            wl += 1;
        }
        wl
    }
}

impl Stage for Smoother {
    type Input = PriceFrame;
    type Output = Vec<f64>;

    fn evaluate(&self, frame: &PriceFrame) -> Vec<f64> {
        let p = &frame.close;

        if p.len() < MIN_SERIES_LEN {
            debug!(bars = p.len(), "series below minimum length, smoothing skipped");
            return p.clone();
        }

        match self.method {
            SmoothingMethod::Ema => ema(p, self.window),
            SmoothingMethod::Polynomial => polynomial(p, self.effective_window(), self.poly_order),
            SmoothingMethod::Lowpass => lowpass(p, self.window),
        }
    }
}

/// Exponential moving average with span semantics: alpha = 2 / (span + 1),
/// seeded at the first sample.
fn ema(p: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);

    let mut out = Vec::with_capacity(p.len());
    let mut s = p[0];

    for &x in p {
        s = alpha * x + (1.0 - alpha) * s;
        out.push(s);
    }

    out
}

/// Local polynomial regression.
///
/// For every index the window is centered and clamped to the series
/// bounds (asymmetric at the edges), a least-squares polynomial of the
/// configured order is fitted over it, and the fit is evaluated at the
/// index itself.
fn polynomial(p: &[f64], window: usize, order: usize) -> Vec<f64> {
    let n = p.len();

    if window > n {
        debug!(window, bars = n, "window exceeds series, smoothing skipped");
        return p.to_vec();
    }

    let half = window / 2;
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let lo = i.saturating_sub(half).min(n - window);
        out.push(fit_poly_at(&p[lo..lo + window], i - lo, order));
    }

    out
}

/// Least-squares polynomial fit over `seg`, evaluated at offset `pos`.
///
/// Solves the normal equations directly; x values are centered on the
/// evaluation point so the fitted value is the constant coefficient.
fn fit_poly_at(seg: &[f64], pos: usize, order: usize) -> f64 {
    let m = order + 1;

    // Power sums up to x^(2*order) plus the y-weighted right-hand side.
    let mut moments = vec![0.0; 2 * order + 1];
    let mut rhs = vec![0.0; m];

    for (j, &y) in seg.iter().enumerate() {
        let x = j as f64 - pos as f64;
        let mut xp = 1.0;

        for (k, moment) in moments.iter_mut().enumerate() {
            *moment += xp;
            if k < m {
                rhs[k] += y * xp;
            }
            xp *= x;
        }
    }

    let mut a = vec![vec![0.0; m + 1]; m];
    for r in 0..m {
        for c in 0..m {
            a[r][c] = moments[r + c];
        }
        a[r][m] = rhs[r];
    }

    // Gaussian elimination with partial pivoting.
    for col in 0..m {
        let mut piv = col;
        for r in col + 1..m {
            if a[r][col].abs() > a[piv][col].abs() {
                piv = r;
            }
        }

        if a[piv][col].abs() < EPS {
            // Degenerate system; leave the sample untouched.
            return seg[pos];
        }

        a.swap(col, piv);

        for r in col + 1..m {
            let f = a[r][col] / a[col][col];
            for c in col..=m {
                a[r][c] -= f * a[col][c];
            }
        }
    }

    // Back substitution; only the constant coefficient is needed.
    let mut coef = vec![0.0; m];
    for r in (0..m).rev() {
        let mut s = a[r][m];
        for c in r + 1..m {
            s -= a[r][c] * coef[c];
        }
        coef[r] = s / a[r][r];
    }

    coef[0]
}

/// Gaussian low-pass convolution.
///
/// Kernel sigma is window / 4 with taps out to four sigma; taps falling
/// outside the series are dropped and the remaining weights renormalized.
fn lowpass(p: &[f64], window: usize) -> Vec<f64> {
    let n = p.len();
    let sigma = (window as f64 / 4.0).max(EPS);
    let radius = (4.0 * sigma).ceil() as usize;

    let kernel: Vec<f64> = (0..=radius)
        .map(|k| (-0.5 * (k as f64 / sigma).powi(2)).exp())
        .collect();

    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let lo = i.saturating_sub(radius);
        let hi = (i + radius).min(n - 1);

        let mut acc = 0.0;
        let mut norm = 0.0;
        for (j, &x) in p.iter().enumerate().take(hi + 1).skip(lo) {
            let w = kernel[i.abs_diff(j)];
            acc += w * x;
            norm += w;
        }

        out.push(acc / norm);
    }

    out
}
