use purrr_sys as sys;

macro_rules! raw_handle {
    ($(#[$meta:meta])* $name:ident => $ptr:ty) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        #[repr(transparent)]
        pub struct $name($ptr);

        impl $name {
            pub const NULL: Self = Self(std::ptr::null_mut());

            #[inline]
            pub fn from_ptr(ptr: $ptr) -> Self {
                Self(ptr)
            }

            #[inline]
            pub fn as_ptr(self) -> $ptr {
                self.0
            }

            #[inline]
            pub fn is_null(self) -> bool {
                self.0.is_null()
            }

            /// Address of the handle, usable as a map key.
            #[inline]
            pub fn addr(self) -> usize {
                self.0.addr()
            }

            /// Handle with the given address and no provenance.
            ///
            /// Only meaningful to drivers that mint their own handle values.
            #[inline]
            pub fn from_addr(addr: usize) -> Self {
                Self(std::ptr::without_provenance_mut(addr))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::NULL
            }
        }
    };
}

raw_handle!(
    /// Bare renderer handle. Carries no ownership.
    RawRenderer => sys::Purrr_Renderer
);
raw_handle!(
    /// Bare window handle. Carries no ownership.
    RawWindow => sys::Purrr_Window
);
raw_handle!(
    /// Bare image handle. Carries no ownership.
    RawImage => sys::Purrr_Image
);
