use crate::foundation::math::Rng64;

/// Coherent 3-D noise sampled as `(x, y, z, octaves) -> scalar` in roughly `[-1, 1]`.
pub trait NoiseSource: Send + Sync {
    /// Sample the field at one point.
    fn sample(&self, x: f64, y: f64, z: f64, octaves: u32) -> f64;

    /// Sample a whole row of `xs` for a fixed `(y, z)` into `out`.
    ///
    /// Only `min(xs.len(), out.len())` samples are written.
    fn sample_row(&self, xs: &[f64], y: f64, z: f64, octaves: u32, out: &mut [f64]) {
        for (o, &x) in out.iter_mut().zip(xs) {
            *o = self.sample(x, y, z, octaves);
        }
    }
}

/// Improved Perlin noise with fractal octaves and a seeded permutation table.
#[derive(Clone)]
pub struct Perlin {
    perm: Box<[u8; 512]>,
}

impl Perlin {
    /// Build a generator whose permutation is shuffled from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut rng = Rng64::new(seed);
        for i in (1..p.len()).rev() {
            let j = rng.next_below(i as u64 + 1) as usize;
            p.swap(i, j);
        }
        let perm = Box::new(std::array::from_fn(|i| p[i & 255]));
        Self { perm }
    }

    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let xf = x.floor();
        let yf = y.floor();
        let zf = z.floor();
        let xi = (xf as i64 & 255) as usize;
        let yi = (yf as i64 & 255) as usize;
        let zi = (zf as i64 & 255) as usize;
        let x = x - xf;
        let y = y - yf;
        let z = z - zf;
        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p[aa], x, y, z), grad(p[ba], x - 1.0, y, z)),
                lerp(
                    u,
                    grad(p[ab], x, y - 1.0, z),
                    grad(p[bb], x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p[aa + 1], x, y, z - 1.0),
                    grad(p[ba + 1], x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(p[ab + 1], x, y - 1.0, z - 1.0),
                    grad(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new(0)
    }
}

impl std::fmt::Debug for Perlin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Perlin").finish_non_exhaustive()
    }
}

impl NoiseSource for Perlin {
    fn sample(&self, x: f64, y: f64, z: f64, octaves: u32) -> f64 {
        let octaves = octaves.max(1);
        let mut sum = 0.0;
        let mut norm = 0.0;
        let mut amp = 1.0;
        let mut freq = 1.0;
        for _ in 0..octaves {
            sum += amp * self.noise3(x * freq, y * freq, z * freq);
            norm += amp;
            amp *= 0.5;
            freq *= 2.0;
        }
        sum / norm
    }
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

#[cfg(test)]
#[path = "../../tests/unit/render/noise.rs"]
mod tests;
