use rand::{RngCore, SeedableRng};

/// Seed the canonical initial state is derived from.
pub const DEFAULT_SEED: u32 = 1;

const MULTIPLIER: u64 = 1_103_515_245;
const INCREMENT: u64 = 12_345;
const MODULUS: u64 = 1 << 31;

/// Linear-congruential generator: `seed' = (a * seed + c) mod 2^31`.
///
/// Deterministic by construction - the same seed always produces the same
/// sequence, which is what makes piece selection reproducible. Drivers feed
/// [`unit`](Lcg::unit) values into `Action::Generate`; the generator also
/// plugs into the `rand` machinery through [`RngCore`] for test use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn new(seed: u32) -> Self {
        Self {
            state: (seed as u64 % MODULUS) as u32,
        }
    }

    /// Advances the generator and returns the new state, in `[0, 2^31)`.
    #[expect(clippy::cast_possible_truncation)]
    pub const fn next_state(&mut self) -> u32 {
        self.state = ((MULTIPLIER * self.state as u64 + INCREMENT) % MODULUS) as u32;
        self.state
    }

    /// Advances the generator and scales the new state to `[-1, 1]`.
    #[expect(clippy::cast_precision_loss)]
    pub fn unit(&mut self) -> f64 {
        2.0 * f64::from(self.next_state()) / (MODULUS - 1) as f64 - 1.0
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        self.next_state()
    }

    fn next_u64(&mut self) -> u64 {
        rand::rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        rand::rand_core::impls::fill_bytes_via_next(self, dst);
    }
}

impl SeedableRng for Lcg {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
