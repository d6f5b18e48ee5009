//! Arbitrary-order image derivatives computed from cached lower orders.
//!
//! Derivatives live in a binary tree of slots. Level `L` holds the
//! order-`L + 1` results, one slot per X/Y history, so it has `2^(L+1)`
//! slots. Bit `i` of a slot index is `0` when step `i` differentiated along
//! X and `1` along Y.
//!
//! Setting a new input only marks slots stale. Buffers stay allocated and are
//! reshaped in place the next time their slot is recomputed.

use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use vm_core::{Error, Image, ImageView};
use vm_filter::{
    Convolve2D, ConvolveHorizontal, ConvolveVertical, ImageFilter, Kernel1D, Kernel2D,
};

use crate::config::{DEFAULT_MAX_ORDER, DerivativeConfig, MAX_SUPPORTED_ORDER};
use crate::error::DerivativeError;
use crate::factory::{FillFactory, ImageFactory};

/// Type-erased derivative step stored by the engine.
pub type BoxedFilter<S, D> = Box<dyn ImageFilter<S, D> + Send + Sync>;

/// Type-erased buffer factory stored by the engine.
pub type BoxedFactory<D> = Box<dyn ImageFactory<D> + Send + Sync>;

/// Differentiation direction for one derivative step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn bit(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }
}

impl From<bool> for Axis {
    /// `true` selects X.
    fn from(is_x: bool) -> Self {
        if is_x { Self::X } else { Self::Y }
    }
}

struct Slot<D> {
    image: Option<Image<D>>,
    stale: bool,
}

impl<D> Slot<D> {
    fn empty() -> Self {
        Self {
            image: None,
            stale: true,
        }
    }

    /// The slot's buffer, created at `width x height` on first use.
    fn buffer(
        &mut self,
        factory: &dyn ImageFactory<D>,
        width: usize,
        height: usize,
    ) -> &mut Image<D> {
        self.image.get_or_insert_with(|| factory.create(width, height))
    }

    /// Sizes the buffer for a recomputation: a missing buffer is created at
    /// `width x height`, an existing one is reshaped in place.
    fn prepare(
        &mut self,
        factory: &dyn ImageFactory<D>,
        width: usize,
        height: usize,
    ) -> Result<&mut Image<D>, Error> {
        match self.image {
            Some(ref mut image) => {
                factory.reshape(image, width, height)?;
                Ok(image)
            }
            None => Ok(self.image.insert(factory.create(width, height))),
        }
    }
}

/// Lazily computed derivatives of any order for one input at a time.
///
/// Not synchronized: every call takes `&mut self`. Use one engine per
/// worker when processing frames in parallel.
pub struct AnyDerivative<'a, I, D> {
    deriv_x: BoxedFilter<I, D>,
    deriv_y: BoxedFilter<I, D>,
    deriv_deriv_x: BoxedFilter<D, D>,
    deriv_deriv_y: BoxedFilter<D, D>,
    factory: BoxedFactory<D>,
    max_order: usize,
    input: Option<ImageView<'a, I>>,
    levels: Vec<Vec<Slot<D>>>,
}

impl<'a, I, D> AnyDerivative<'a, I, D> {
    /// Builds an engine from four prebuilt filters.
    ///
    /// `deriv_x`/`deriv_y` produce first-order derivatives from the input;
    /// `deriv_deriv_x`/`deriv_deriv_y` differentiate a derivative image again.
    pub fn from_filters<FX, FY, FXX, FYY, G>(
        deriv_x: FX,
        deriv_y: FY,
        deriv_deriv_x: FXX,
        deriv_deriv_y: FYY,
        factory: G,
    ) -> Self
    where
        FX: ImageFilter<I, D> + Send + Sync + 'static,
        FY: ImageFilter<I, D> + Send + Sync + 'static,
        FXX: ImageFilter<D, D> + Send + Sync + 'static,
        FYY: ImageFilter<D, D> + Send + Sync + 'static,
        G: ImageFactory<D> + Send + Sync + 'static,
    {
        Self {
            deriv_x: Box::new(deriv_x),
            deriv_y: Box::new(deriv_y),
            deriv_deriv_x: Box::new(deriv_deriv_x),
            deriv_deriv_y: Box::new(deriv_deriv_y),
            factory: Box::new(factory),
            max_order: DEFAULT_MAX_ORDER,
            input: None,
            levels: Vec::new(),
        }
    }

    /// Caps the derivative order, clamped to `1..=MAX_SUPPORTED_ORDER`.
    pub fn with_max_order(mut self, max_order: usize) -> Self {
        self.max_order = max_order.clamp(1, MAX_SUPPORTED_ORDER);
        self
    }

    /// Highest order `derivative` accepts.
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Number of allocated tree levels; zero before the first request.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// The current input, `None` until the first `set_input`.
    pub fn input(&self) -> Option<ImageView<'a, I>> {
        self.input
    }

    /// Replaces the input and marks every cached derivative stale.
    pub fn set_input(&mut self, input: ImageView<'a, I>) {
        debug!(
            "derivative input set to {}x{}, invalidating {} levels",
            input.width(),
            input.height(),
            self.levels.len()
        );
        self.input = Some(input);
        for slot in self.levels.iter_mut().flatten() {
            slot.stale = true;
        }
    }

    /// Whether the derivative for `axes` is cached for the current input.
    pub fn is_fresh(&self, axes: &[Axis]) -> bool {
        let Some(slots) = axes
            .len()
            .checked_sub(1)
            .and_then(|level| self.levels.get(level))
        else {
            return false;
        };
        let index = axes
            .iter()
            .enumerate()
            .fold(0, |index, (l, &axis)| slot_index(index, l, axis));

        slots
            .get(index)
            .is_some_and(|slot| !slot.stale && slot.image.is_some())
    }

    /// Returns the derivative obtained by differentiating along `axes` in
    /// order, first element first.
    ///
    /// Stale prefixes are recomputed from their parents; fresh ones are
    /// reused. The result borrows the cache and stays valid until the next
    /// mutating call.
    pub fn derivative(&mut self, axes: &[Axis]) -> Result<&Image<D>, DerivativeError> {
        let order = axes.len();
        if order == 0 {
            return Err(DerivativeError::EmptyAxisSequence);
        }
        if order > self.max_order {
            return Err(DerivativeError::OrderTooHigh {
                order,
                max: self.max_order,
            });
        }
        let input = self.input.ok_or(DerivativeError::MissingInput)?;

        self.ensure_depth(order);

        let (w, h) = input.dims();
        let factory = &*self.factory;
        let mut index = 0usize;
        let mut prev_index = 0usize;

        for (level, &axis) in axes.iter().enumerate() {
            index = slot_index(index, level, axis);
            debug_assert!(index < self.levels[level].len());

            let (parents, rest) = self.levels.split_at_mut(level);
            let slot = &mut rest[0][index];
            if slot.stale {
                trace!("computing derivative level {level} slot {index} along {axis:?}");
                let dst = slot.prepare(factory, w, h)?;

                match parents.last_mut() {
                    None => {
                        let filter = match axis {
                            Axis::X => &self.deriv_x,
                            Axis::Y => &self.deriv_y,
                        };
                        filter.process(&input, dst)?;
                    }
                    Some(parent_level) => {
                        let parent = parent_level[prev_index].buffer(factory, w, h);
                        let filter = match axis {
                            Axis::X => &self.deriv_deriv_x,
                            Axis::Y => &self.deriv_deriv_y,
                        };
                        filter.process(&parent.as_view(), dst)?;
                    }
                }

                slot.stale = false;
            }

            prev_index = index;
        }

        Ok(self.levels[order - 1][index].buffer(factory, w, h))
    }

    fn ensure_depth(&mut self, order: usize) {
        let depth = self.levels.len();
        if order <= depth {
            return;
        }

        if depth == 0 {
            debug!("declaring derivative tree with {order} levels");
        } else {
            debug!("growing derivative tree from {depth} to {order} levels");
        }

        self.levels.extend(
            (depth..order).map(|level| (0..slots_at(level)).map(|_| Slot::empty()).collect()),
        );
    }
}

impl<'a, I> AnyDerivative<'a, I, f32>
where
    I: Copy + Into<f32>,
{
    /// Separable engine: `kernel` along rows for X and along columns for Y,
    /// for both the first and the higher orders.
    pub fn from_kernel_1d(kernel: &Kernel1D, cfg: &DerivativeConfig) -> Self {
        Self::from_filters(
            ConvolveHorizontal::new(kernel.clone(), cfg.border),
            ConvolveVertical::new(kernel.clone(), cfg.border),
            ConvolveHorizontal::new(kernel.clone(), cfg.border),
            ConvolveVertical::new(kernel.clone(), cfg.border),
            FillFactory::<f32>::zeroed(),
        )
        .with_max_order(cfg.max_order)
    }

    /// 2D engine: `kernel_x` differentiates along X, its transpose along Y.
    pub fn from_kernel_2d(kernel_x: &Kernel2D, cfg: &DerivativeConfig) -> Self {
        let kernel_y = kernel_x.transpose();
        Self::from_filters(
            Convolve2D::new(kernel_x.clone(), cfg.border),
            Convolve2D::new(kernel_y.clone(), cfg.border),
            Convolve2D::new(kernel_x.clone(), cfg.border),
            Convolve2D::new(kernel_y, cfg.border),
            FillFactory::<f32>::zeroed(),
        )
        .with_max_order(cfg.max_order)
    }
}

impl<I, D> fmt::Debug for AnyDerivative<'_, I, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyDerivative")
            .field("max_order", &self.max_order)
            .field("depth", &self.levels.len())
            .field("input_dims", &self.input.map(|v| v.dims()))
            .finish_non_exhaustive()
    }
}

#[inline]
fn slots_at(level: usize) -> usize {
    1 << (level + 1)
}

/// Adds the bit for step `level` and drops anything above `level + 1` bits.
#[inline]
fn slot_index(index: usize, level: usize, axis: Axis) -> usize {
    (index | (axis.bit() << level)) & (slots_at(level) - 1)
}
