//! Random live-color palettes.
//!
//! Candidates are sampled in CIE LCh within kind-specific lightness and
//! chroma ranges, out-of-gamut samples are rejected, and the final colors
//! are picked from the candidate pool by farthest-point selection in Oklab.

use std::fmt;

use lifelight_automaton::{ColorScheme, Rgba};
use log::{debug, warn};
use palette::convert::IntoColorUnclamped;
use palette::{Hsv, IntoColor, Lch, Oklab, Srgb};
use rand::Rng;
use serde::Deserialize;

/// Candidates kept per requested color.
const POOL_PER_COLOR: usize = 24;

/// Sampling attempts per requested color before giving up.
const ATTEMPTS_PER_COLOR: usize = 2000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
  /// Bright, saturated colors.
  Happy,
  /// Pastel colors.
  Soft,
  /// Dim, low-chroma colors.
  Warm,
}

impl PaletteKind {
  /// Allowed (lightness, chroma) ranges in LCh units.
  fn ranges(self) -> ((f32, f32), (f32, f32)) {
    match self {
      Self::Happy => ((40.0, 80.0), (30.0, 130.0)),
      Self::Soft => ((50.0, 90.0), (10.0, 50.0)),
      Self::Warm => ((20.0, 50.0), (10.0, 40.0)),
    }
  }
}

impl fmt::Display for PaletteKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Happy => "happy",
      Self::Soft => "soft",
      Self::Warm => "warm",
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
  NotEnoughColors {
    kind: PaletteKind,
    wanted: usize,
    found: usize,
  },
}

impl fmt::Display for PaletteError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NotEnoughColors { kind, wanted, found } => write!(
        f,
        "{} palette: wanted {} colors, found {} in gamut",
        kind, wanted, found
      ),
    }
  }
}

impl std::error::Error for PaletteError {}

/// Generates `n` well-separated colors of the given kind.
pub fn generate<R: Rng + ?Sized>(kind: PaletteKind, n: usize, rng: &mut R) -> Result<Vec<Rgba>, PaletteError> {
  if n == 0 {
    return Ok(Vec::new());
  }

  let ((l_min, l_max), (c_min, c_max)) = kind.ranges();
  let mut pool: Vec<(Srgb, Oklab)> = Vec::with_capacity(n * POOL_PER_COLOR);

  for _ in 0..n * ATTEMPTS_PER_COLOR {
    if pool.len() == n * POOL_PER_COLOR {
      break;
    }
    let lch: Lch = Lch::new(
      rng.random_range(l_min..=l_max),
      rng.random_range(c_min..=c_max),
      rng.random_range(0.0..360.0f32),
    );
    let rgb: Srgb = lch.into_color_unclamped();
    if !in_gamut(rgb) {
      continue;
    }
    pool.push((rgb, rgb.into_color()));
  }

  if pool.len() < n {
    return Err(PaletteError::NotEnoughColors {
      kind,
      wanted: n,
      found: pool.len(),
    });
  }

  let picked = farthest_points(&pool, n, rng.random_range(0..pool.len()));
  Ok(picked.into_iter().map(|i| to_rgba(pool[i].0)).collect())
}

/// Evenly spaced hues with random saturation and value. Never fails.
pub fn fast_happy<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Rgba> {
  (0..n)
    .map(|i| {
      let hue = i as f32 * 360.0 / n as f32;
      let hsv: Hsv = Hsv::new(
        hue,
        0.8 + rng.random::<f32>() * 0.2,
        0.65 + rng.random::<f32>() * 0.2,
      );
      let rgb: Srgb = hsv.into_color();
      to_rgba(rgb)
    })
    .collect()
}

/// Builds a scheme from a random kind in `kinds`, falling back to
/// [`fast_happy`] when generation fails.
pub fn generate_scheme<R: Rng + ?Sized>(kinds: &[PaletteKind], n: usize, rng: &mut R) -> ColorScheme {
  let colors = match kinds.get(rng.random_range(0..kinds.len().max(1))) {
    Some(&kind) => match generate(kind, n, rng) {
      Ok(colors) => {
        debug!(target: "color", "generated {} palette: {:?}", kind, colors);
        colors
      }
      Err(e) => {
        warn!(target: "color", "failed to generate palette: {}", e);
        fast_happy(n, rng)
      }
    },
    None => fast_happy(n, rng),
  };
  ColorScheme::from_live(&colors)
}

fn in_gamut(rgb: Srgb) -> bool {
  [rgb.red, rgb.green, rgb.blue]
    .iter()
    .all(|c| (0.0..=1.0).contains(c))
}

fn to_rgba(rgb: Srgb) -> Rgba {
  let c: Srgb<u8> = rgb.into_format();
  Rgba::rgb(c.red, c.green, c.blue)
}

fn oklab_distance_sq(a: Oklab, b: Oklab) -> f32 {
  let dl = a.l - b.l;
  let da = a.a - b.a;
  let db = a.b - b.b;
  dl * dl + da * da + db * db
}

/// Greedy farthest-point selection of `n` pool indices starting at `first`.
fn farthest_points(pool: &[(Srgb, Oklab)], n: usize, first: usize) -> Vec<usize> {
  let mut picked = vec![first];
  let mut nearest: Vec<f32> = pool
    .iter()
    .map(|&(_, lab)| oklab_distance_sq(lab, pool[first].1))
    .collect();

  while picked.len() < n {
    let mut best = 0;
    for (i, &d) in nearest.iter().enumerate() {
      if d > nearest[best] {
        best = i;
      }
    }
    picked.push(best);
    let chosen = pool[best].1;
    for (d, &(_, lab)) in nearest.iter_mut().zip(pool) {
      *d = d.min(oklab_distance_sq(lab, chosen));
    }
  }

  picked
}

#[cfg(test)]
mod tests {
  use rand::SeedableRng;
  use rand::rngs::StdRng;

  use super::*;

  #[test]
  fn generates_requested_count() {
    let mut rng = StdRng::seed_from_u64(3);
    for kind in [PaletteKind::Happy, PaletteKind::Soft, PaletteKind::Warm] {
      for n in [1, 4, 15] {
        let colors = generate(kind, n, &mut rng).unwrap();
        assert_eq!(colors.len(), n, "{kind}");
        assert!(colors.iter().all(|c| c.a == 255));
      }
    }
    assert!(generate(PaletteKind::Happy, 0, &mut rng).unwrap().is_empty());
  }

  #[test]
  fn colors_are_distinct() {
    let mut rng = StdRng::seed_from_u64(11);
    let colors = generate(PaletteKind::Happy, 8, &mut rng).unwrap();
    for (i, a) in colors.iter().enumerate() {
      for b in &colors[i + 1..] {
        assert_ne!(a, b);
      }
    }
  }

  #[test]
  fn warm_is_darker_than_soft() {
    let mut rng = StdRng::seed_from_u64(5);
    let luma = |c: &Rgba| c.r as u32 + c.g as u32 + c.b as u32;
    let warm: u32 = generate(PaletteKind::Warm, 6, &mut rng).unwrap().iter().map(luma).sum();
    let soft: u32 = generate(PaletteKind::Soft, 6, &mut rng).unwrap().iter().map(luma).sum();
    assert!(warm < soft, "warm {warm} soft {soft}");
  }

  #[test]
  fn farthest_points_spreads_out() {
    let lab = |l: f32| Oklab::new(l, 0.0, 0.0);
    let rgb: Srgb = Srgb::new(0.0, 0.0, 0.0);
    let pool = [
      (rgb, lab(0.0)),
      (rgb, lab(0.1)),
      (rgb, lab(0.5)),
      (rgb, lab(0.9)),
      (rgb, lab(1.0)),
    ];
    let mut picked = farthest_points(&pool, 3, 0);
    picked.sort_unstable();
    assert_eq!(picked, vec![0, 2, 4]);
  }

  #[test]
  fn fast_happy_spaces_hues() {
    let mut rng = StdRng::seed_from_u64(1);
    let colors = fast_happy(3, &mut rng);
    assert_eq!(colors.len(), 3);
    // Hue 0 is red dominant.
    assert!(colors[0].r > colors[0].g && colors[0].r > colors[0].b);
  }

  #[test]
  fn scheme_from_kinds() {
    let mut rng = StdRng::seed_from_u64(9);
    let scheme = generate_scheme(&[PaletteKind::Soft], 4, &mut rng);
    assert_eq!(scheme.live_count(), 4);
    let fallback = generate_scheme(&[], 2, &mut rng);
    assert_eq!(fallback.live_count(), 2);
  }
}
