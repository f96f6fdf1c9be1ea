pub trait FloatAsExt {
    /// Returns `Some(f)` is f is far enough from zero (far is given by eps) else returns None
    ///
    /// Returns None for NaN and Some(f) for +/- infty
    fn into_non_zero(self, eps: Self) -> Option<f32>;

    /// Returns `Some(f)` is f is finite else returns None
    ///
    /// Returns None for NaN and +/- infty
    fn into_finite(self) -> Option<f32>;
}

impl FloatAsExt for f32 {
    fn into_non_zero(self, eps: Self) -> Option<f32> {
        (self.abs() > eps).then_some(self)
    }

    fn into_finite(self) -> Option<f32> {
        self.is_finite().then_some(self)
    }
}

pub trait Vec3AsNonZero: Sized {
    fn into_non_zero(self, eps: f32) -> Option<Self>;
}

impl Vec3AsNonZero for glam::Vec3 {
    fn into_non_zero(self, eps: f32) -> Option<Self> {
        self.is_finite()
            .then_some(self.length_squared())
            .and_then(|l| l.into_non_zero(eps * eps))
            .and(Some(self))
    }
}
