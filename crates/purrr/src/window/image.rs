use std::marker::PhantomData;

use crate::driver::RawImage;

/// The color image a window presents.
///
/// The image belongs to its window and is never destroyed through this
/// type; the borrow keeps it from outliving the window.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Image<'w> {
    raw: RawImage,
    _window: PhantomData<&'w ()>,
}

impl<'w> Image<'w> {
    pub(crate) fn new(raw: RawImage) -> Self {
        Self {
            raw,
            _window: PhantomData,
        }
    }

    #[inline]
    pub fn raw(&self) -> RawImage {
        self.raw
    }
}
