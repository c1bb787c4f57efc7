use pyo3::prelude::*;

use lakeprofile_core::geodesy;

#[pyfunction]
fn great_circle_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    geodesy::great_circle_distance(lat1, lon1, lat2, lon2)
}

#[pyfunction]
fn estimate_cell_area(lat: f64, lon: f64, resolution: f64) -> f64 {
    geodesy::estimate_cell_area(lat, lon, resolution)
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "geodesy")?;
    m.add_function(wrap_pyfunction!(great_circle_distance, &m)?)?;
    m.add_function(wrap_pyfunction!(estimate_cell_area, &m)?)?;
    m.add("EARTH_RADIUS_KM", geodesy::EARTH_RADIUS_KM)?;
    parent.add_submodule(&m)?;
    Ok(())
}
