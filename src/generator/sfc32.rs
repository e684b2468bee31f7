// sfc32-family small fast counter generator. Suitable for deterministic UI
// figures, not security.

/// Output scale: 2^32.
const SCALE: f64 = 4_294_967_296.0;

#[derive(Debug, Clone)]
pub struct Sfc32 {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl Sfc32 {
    pub fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self { a, b, c, d }
    }

    pub fn from_words([a, b, c, d]: [u32; 4]) -> Self {
        Self::new(a, b, c, d)
    }

    /// Next raw word (pre-update combination of `a` and `b`).
    ///
    /// The counter `d` advances but is not folded into the output. Existing
    /// clients produce this exact sequence, so it must stay that way.
    pub fn next_u32(&mut self) -> u32 {
        let t = self.a.wrapping_add(self.b);
        self.d = self.d.wrapping_add(1);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(21).wrapping_add(t);
        t
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_in_unit_interval() {
        let mut rng = Sfc32::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn zero_state_yields_zero_first() {
        let mut rng = Sfc32::new(0, 0, 0, 0);
        assert_eq!(rng.next_f64(), 0.0);
    }

    #[test]
    fn counter_word_does_not_change_output() {
        let mut x = Sfc32::new(1, 2, 3, 0);
        let mut y = Sfc32::new(1, 2, 3, 0xdead_beef);
        for _ in 0..16 {
            assert_eq!(x.next_u32(), y.next_u32());
        }
    }
}
