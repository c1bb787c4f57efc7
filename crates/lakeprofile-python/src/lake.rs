use std::path::PathBuf;

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::convert::{contiguous_slice, to_py_err};

use lakeprofile_core::lake::constants::MAX_LAKE_NODES;
use lakeprofile_core::lake::geometry::{build_lake_geometry_with_limit, LakeGeometry};
use lakeprofile_core::{
    initialize, LakeCell, LakeOptions, LakeParamReader, LakeParameterRecord, ProfileKind,
    ProfileSpec,
};

// ---------------------------------------------------------------------------
// Typed pyclass result object
// ---------------------------------------------------------------------------

/// Lake geometry with scalar attributes and per-node numpy arrays.
#[pyclass(frozen)]
pub struct LakeGeometryResult {
    #[pyo3(get)]
    pub cell_id: i64,
    #[pyo3(get)]
    pub grid_cell_area: f64,
    #[pyo3(get)]
    pub node_count: usize,
    #[pyo3(get)]
    pub max_depth: f64,
    #[pyo3(get)]
    pub min_depth: f64,
    #[pyo3(get)]
    pub max_drawdown_rate: f64,
    #[pyo3(get)]
    pub initial_depth: f64,
    #[pyo3(get)]
    pub runoff_fraction: f64,
    #[pyo3(get)]
    pub baseflow_fraction: f64,
    #[pyo3(get)]
    pub wetland_veg_class: usize,
    #[pyo3(get)]
    pub layer_thickness: f64,
    #[pyo3(get)]
    pub max_volume: f64,
    /// Fraction of the grid cell allotted to the lake.
    #[pyo3(get)]
    pub footprint_fraction: f64,
    #[pyo3(get)]
    pub node_depth: Py<PyArray1<f64>>,
    #[pyo3(get)]
    pub node_surface_area: Py<PyArray1<f64>>,
    #[pyo3(get)]
    pub area_fractions: Py<PyArray1<f64>>,
}

impl LakeGeometryResult {
    pub fn from_geometry(py: Python<'_>, g: LakeGeometry) -> Self {
        Self {
            cell_id: g.cell_id,
            grid_cell_area: g.grid_cell_area,
            node_count: g.node_count,
            max_depth: g.max_depth,
            min_depth: g.min_depth,
            max_drawdown_rate: g.max_drawdown_rate,
            initial_depth: g.initial_depth,
            runoff_fraction: g.runoff_fraction,
            baseflow_fraction: g.baseflow_fraction,
            wetland_veg_class: g.wetland_veg_class,
            layer_thickness: g.layer_thickness,
            max_volume: g.max_volume,
            footprint_fraction: g.footprint_fraction(),
            node_depth: PyArray1::from_slice(py, g.node_depth.as_slice()).unbind(),
            node_surface_area: PyArray1::from_slice(py, g.node_surface_area.as_slice()).unbind(),
            area_fractions: PyArray1::from_slice(py, g.area_fractions.as_slice()).unbind(),
        }
    }
}

fn parse_profile_kind(name: &str) -> PyResult<ProfileKind> {
    match name {
        "tabulated" => Ok(ProfileKind::Tabulated),
        "parabolic" => Ok(ProfileKind::Parabolic),
        other => Err(PyValueError::new_err(format!(
            "unknown profile '{}', expected 'tabulated' or 'parabolic'",
            other
        ))),
    }
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

#[pyfunction]
#[pyo3(signature = (
    cell_id, max_depth, node_count, min_depth, max_drawdown_rate, initial_depth,
    runoff_fraction, area_fractions, grid_cell_area, cv_sum=0.0, max_nodes=MAX_LAKE_NODES
))]
#[allow(clippy::too_many_arguments)]
fn build_lake_geometry<'py>(
    py: Python<'py>,
    cell_id: i64,
    max_depth: f64,
    node_count: usize,
    min_depth: f64,
    max_drawdown_rate: f64,
    initial_depth: f64,
    runoff_fraction: f64,
    area_fractions: PyReadonlyArray1<'py, f64>,
    grid_cell_area: f64,
    cv_sum: f64,
    max_nodes: usize,
) -> PyResult<(LakeGeometryResult, f64)> {
    let fractions = contiguous_slice(&area_fractions)?;
    let record = LakeParameterRecord {
        cell_id,
        max_depth,
        node_count,
        min_depth,
        max_drawdown_rate,
        initial_depth,
        runoff_fraction,
        profile: ProfileSpec::Tabulated {
            area_fractions: fractions.to_vec(),
        },
    };

    let (geometry, cv_sum) =
        build_lake_geometry_with_limit(&record, grid_cell_area, cv_sum, max_nodes)
            .map_err(to_py_err)?;
    Ok((LakeGeometryResult::from_geometry(py, geometry), cv_sum))
}

#[pyfunction]
#[pyo3(signature = (
    cell_id, max_depth, node_count, min_depth, max_drawdown_rate, initial_depth,
    runoff_fraction, footprint_fraction, exponent, grid_cell_area, cv_sum=0.0,
    max_nodes=MAX_LAKE_NODES
))]
#[allow(clippy::too_many_arguments)]
fn build_parabolic_lake_geometry(
    py: Python<'_>,
    cell_id: i64,
    max_depth: f64,
    node_count: usize,
    min_depth: f64,
    max_drawdown_rate: f64,
    initial_depth: f64,
    runoff_fraction: f64,
    footprint_fraction: f64,
    exponent: f64,
    grid_cell_area: f64,
    cv_sum: f64,
    max_nodes: usize,
) -> PyResult<(LakeGeometryResult, f64)> {
    let record = LakeParameterRecord {
        cell_id,
        max_depth,
        node_count,
        min_depth,
        max_drawdown_rate,
        initial_depth,
        runoff_fraction,
        profile: ProfileSpec::Parabolic {
            footprint_fraction,
            exponent,
        },
    };

    let (geometry, cv_sum) =
        build_lake_geometry_with_limit(&record, grid_cell_area, cv_sum, max_nodes)
            .map_err(to_py_err)?;
    Ok((LakeGeometryResult::from_geometry(py, geometry), cv_sum))
}

#[pyfunction]
#[pyo3(signature = (
    path, cell_id, lat, lon, resolution, cv_sum=0.0, profile="tabulated",
    max_nodes=MAX_LAKE_NODES
))]
#[allow(clippy::too_many_arguments)]
fn read_lake_parameters(
    py: Python<'_>,
    path: PathBuf,
    cell_id: i64,
    lat: f64,
    lon: f64,
    resolution: f64,
    cv_sum: f64,
    profile: &str,
    max_nodes: usize,
) -> PyResult<(LakeGeometryResult, f64)> {
    // A fresh reader per call always starts at the top of the file.
    let options = LakeOptions {
        profile: parse_profile_kind(profile)?,
        rewind: true,
        max_nodes,
    };
    let cell = LakeCell::new(cell_id, lat, lon, resolution);

    let mut reader = LakeParamReader::open(&path).map_err(to_py_err)?;
    let (geometry, cv_sum) = initialize(&mut reader, &cell, cv_sum, &options).map_err(to_py_err)?;
    Ok((LakeGeometryResult::from_geometry(py, geometry), cv_sum))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "lake")?;
    m.add_function(wrap_pyfunction!(build_lake_geometry, &m)?)?;
    m.add_function(wrap_pyfunction!(build_parabolic_lake_geometry, &m)?)?;
    m.add_function(wrap_pyfunction!(read_lake_parameters, &m)?)?;
    m.add_class::<LakeGeometryResult>()?;
    m.add("MAX_LAKE_NODES", MAX_LAKE_NODES)?;
    parent.add_submodule(&m)?;
    Ok(())
}
