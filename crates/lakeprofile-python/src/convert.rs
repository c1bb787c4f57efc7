use numpy::PyReadonlyArray1;
use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;

use lakeprofile_core::LakeParamError;

/// Validate that a numpy array is C-contiguous and return its slice.
pub fn contiguous_slice<'py>(arr: &'py PyReadonlyArray1<'py, f64>) -> PyResult<&'py [f64]> {
    arr.as_slice()
        .map_err(|_| PyValueError::new_err("array must be C-contiguous"))
}

/// Map a core error onto the matching Python exception.
pub fn to_py_err(err: LakeParamError) -> PyErr {
    match err {
        LakeParamError::Io(e) => PyOSError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}
