//! Path provider bound from a shared library at runtime.
//!
//! The library has to export the provider ABI:
//! ```text
//! void  Set_Param_A(float a);
//! void  Set_Param_B(float b);
//! float PaB_Path(float x);
//! ```
//! Parameters live inside the library, so two providers loaded from the same
//! file share them.

use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};

use super::{ParamSlots, PathProvider};
use crate::error::{ParkingError, Result};

type SetParamFn = unsafe extern "C" fn(f32);
type EvaluateFn = unsafe extern "C" fn(f32) -> f32;

const SET_PRIMARY_SYMBOL: &[u8] = b"Set_Param_A\0";
const SET_OFFSET_SYMBOL: &[u8] = b"Set_Param_B\0";
const EVALUATE_SYMBOL: &[u8] = b"PaB_Path\0";

/// Native provider; keeps its library loaded for as long as it lives
pub struct NativePath {
    set_primary: SetParamFn,
    set_offset: SetParamFn,
    evaluate: EvaluateFn,
    params: ParamSlots,
    path: PathBuf,
    // Declared last so the function pointers above never outlive it.
    _library: Library,
}

impl NativePath {
    /// Open `path` and resolve the three ABI symbols.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // SAFETY: loading runs the library's initializers; the provider
        // library is trusted configuration input.
        let library = unsafe { Library::new(path) }.map_err(|err| {
            ParkingError::provider_unavailable(format!("{}: {err}", path.display()))
        })?;

        // SAFETY: the symbol types match the provider ABI documented above.
        let (set_primary, set_offset, evaluate) = unsafe {
            (
                load_symbol::<SetParamFn>(&library, path, SET_PRIMARY_SYMBOL)?,
                load_symbol::<SetParamFn>(&library, path, SET_OFFSET_SYMBOL)?,
                load_symbol::<EvaluateFn>(&library, path, EVALUATE_SYMBOL)?,
            )
        };

        tracing::info!(library = %path.display(), "bound native path provider");
        Ok(Self {
            set_primary,
            set_offset,
            evaluate,
            params: ParamSlots::default(),
            path: path.to_path_buf(),
            _library: library,
        })
    }

    /// Path of the loaded library
    pub fn library_path(&self) -> &Path {
        &self.path
    }
}

unsafe fn load_symbol<T: Copy>(library: &Library, path: &Path, name: &[u8]) -> Result<T> {
    let symbol: Symbol<'_, T> = library.get(name).map_err(|err| {
        let name = String::from_utf8_lossy(&name[..name.len() - 1]);
        ParkingError::provider_unavailable(format!(
            "{}: missing symbol `{name}`: {err}",
            path.display()
        ))
    })?;
    Ok(*symbol)
}

impl PathProvider for NativePath {
    fn name(&self) -> &str {
        "native"
    }

    fn configure_primary(&mut self, a: f32) {
        // SAFETY: resolved from the provider ABI; the library is still loaded.
        unsafe { (self.set_primary)(a) };
        self.params.set_primary(a);
    }

    fn configure_offset(&mut self, b: f32) {
        // SAFETY: as above.
        unsafe { (self.set_offset)(b) };
        self.params.set_offset(b);
    }

    fn evaluate(&self, x: f32) -> Result<f32> {
        self.params.require(self.name())?;
        // SAFETY: as above; the library has been configured.
        Ok(unsafe { (self.evaluate)(x) })
    }
}

impl std::fmt::Debug for NativePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativePath")
            .field("path", &self.path)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
