use crate::collection::{DomStringList, NameList};
use crate::config::{DomConfiguration, DomDiagnostic, ErrorHandler, ParamValue};
use crate::error::DomError;
use crate::types::NamePair;
use pyo3::exceptions::PyException;
use pyo3::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

pyo3::create_exception!(_core, DOMException, PyException);

pub(crate) fn to_py_err(e: DomError) -> PyErr {
    DOMException::new_err(format!("{}: {}", e.name(), e))
}

/// A Python callable installed as `error-handler`. It receives
/// `(severity, kind, message)` and returns whether to continue.
struct PyErrorHandler {
    callback: Py<PyAny>,
}

impl ErrorHandler for PyErrorHandler {
    fn handle_error(&self, diagnostic: &DomDiagnostic) -> bool {
        Python::attach(|py| {
            let args = (diagnostic.severity as u8, diagnostic.kind.as_str(), diagnostic.message.as_str());
            self.callback
                .call1(py, args)
                .and_then(|ret| ret.extract::<bool>(py))
                .unwrap_or(false)
        })
    }
}

fn param_from_py(value: &Bound<'_, PyAny>) -> PyResult<ParamValue> {
    if value.is_none() {
        Ok(ParamValue::Null)
    } else if let Ok(b) = value.extract::<bool>() {
        Ok(ParamValue::Bool(b))
    } else if let Ok(s) = value.extract::<String>() {
        Ok(ParamValue::Text(s))
    } else if value.is_callable() {
        let handler: Arc<dyn ErrorHandler> = Arc::new(PyErrorHandler { callback: value.clone().unbind() });
        Ok(ParamValue::Handler(handler))
    } else {
        Err(to_py_err(DomError::type_mismatch("boolean, DOMString or callable", value.get_type().name()?)))
    }
}

/// `callback` is the Python object behind a `Handler` value, if any.
fn param_to_py(py: Python<'_>, value: &ParamValue, callback: Option<&Py<PyAny>>) -> PyResult<Py<PyAny>> {
    Ok(match value {
        ParamValue::Null => py.None(),
        ParamValue::Bool(b) => (*b).into_pyobject(py)?.to_owned().into_any().unbind(),
        ParamValue::Text(s) => s.as_str().into_pyobject(py)?.into_any().unbind(),
        ParamValue::Handler(_) => callback.map_or_else(|| py.None(), |cb| cb.clone_ref(py)),
    })
}

#[pyclass(name = "DOMStringList")]
#[derive(Debug)]
pub struct PyDomStringList {
    pub(crate) inner: DomStringList,
}

#[pymethods]
impl PyDomStringList {
    #[new]
    #[pyo3(signature = (items=Vec::new(), readonly=false))]
    pub fn new(items: Vec<String>, readonly: bool) -> PyResult<Self> {
        // A read-only list built from Python has no owner on the Rust side.
        let (inner, _) = DomStringList::from_strings(items, readonly).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    pub fn item(&self, index: isize) -> Option<String> {
        self.inner.item(index).cloned()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.inner.contains(&value.to_string())
    }

    #[pyo3(name = "indexOf")]
    pub fn index_of(&self, value: &str) -> isize {
        self.inner.index_of(&value.to_string()).map_or(-1, |i| i as isize)
    }

    pub fn append(&mut self, value: String) -> PyResult<()> {
        self.inner.append(value).map_err(to_py_err)
    }

    pub fn insert(&mut self, index: usize, value: String) -> PyResult<()> {
        self.inner.insert(index, value).map_err(to_py_err)
    }

    pub fn clear(&mut self) -> PyResult<()> {
        self.inner.clear().map_err(to_py_err)
    }

    #[getter]
    pub fn length(&self) -> usize { self.inner.len() }

    #[getter]
    pub fn readonly(&self) -> bool { self.inner.is_read_only() }

    fn __len__(&self) -> usize { self.inner.len() }

    fn __contains__(&self, value: &str) -> bool { self.contains(value) }

    fn __getitem__(&self, index: isize) -> Option<String> { self.item(index) }

    fn __repr__(&self) -> String { self.inner.to_string() }
}

#[pyclass(name = "NameList")]
#[derive(Debug)]
pub struct PyNameList {
    inner: NameList,
}

#[pymethods]
impl PyNameList {
    #[new]
    #[pyo3(signature = (items=Vec::new(), readonly=false))]
    pub fn new(items: Vec<(Option<String>, String)>, readonly: bool) -> PyResult<Self> {
        let pairs = items.into_iter().map(|(namespace_uri, name)| NamePair { namespace_uri, name });
        let (inner, _) = NameList::from_pairs(pairs, readonly).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    pub fn item(&self, index: isize) -> Option<(Option<String>, String)> {
        self.inner.item(index).map(|pair| (pair.namespace_uri.clone(), pair.name.clone()))
    }

    #[pyo3(name = "getName")]
    pub fn get_name(&self, index: isize) -> Option<String> {
        self.inner.get_name(index).map(str::to_string)
    }

    #[pyo3(name = "getNamespaceURI")]
    pub fn get_namespace_uri(&self, index: isize) -> Option<String> {
        self.inner.get_namespace_uri(index).map(str::to_string)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_name(name)
    }

    #[pyo3(name = "containsNS", signature = (namespace_uri, name))]
    pub fn contains_ns(&self, namespace_uri: Option<&str>, name: &str) -> bool {
        self.inner.contains_ns(namespace_uri, name)
    }

    #[getter]
    pub fn length(&self) -> usize { self.inner.len() }

    fn __len__(&self) -> usize { self.inner.len() }

    fn __contains__(&self, name: &str) -> bool { self.contains(name) }

    fn __getitem__(&self, index: isize) -> Option<(Option<String>, String)> { self.item(index) }

    fn __repr__(&self) -> String { self.inner.to_string() }
}

#[pyclass(name = "DOMConfiguration")]
#[derive(Debug, Default)]
pub struct PyDomConfiguration {
    inner: DomConfiguration,
    // Python callables installed as handlers, by parameter name.
    callbacks: HashMap<String, Py<PyAny>>,
}

#[pymethods]
impl PyDomConfiguration {
    #[new]
    pub fn new() -> Self { Self::default() }

    #[pyo3(name = "setParameter")]
    pub fn set_parameter(&mut self, name: &str, value: &Bound<'_, PyAny>) -> PyResult<()> {
        let param = param_from_py(value)?;
        let is_handler = matches!(param, ParamValue::Handler(_));
        self.inner.set(name, param).map_err(to_py_err)?;
        let key = name.to_lowercase();
        if is_handler {
            self.callbacks.insert(key, value.clone().unbind());
        } else {
            self.callbacks.remove(&key);
        }
        Ok(())
    }

    #[pyo3(name = "getParameter")]
    pub fn get_parameter(&self, py: Python<'_>, name: &str) -> PyResult<Py<PyAny>> {
        let value = self.inner.get(name).map_err(to_py_err)?;
        param_to_py(py, value, self.callbacks.get(&name.to_lowercase()))
    }

    #[pyo3(name = "canSetParameter")]
    pub fn can_set_parameter(&self, name: &str) -> bool {
        self.inner.can_set(name)
    }

    /// A read-only snapshot of the advertised names.
    #[getter(parameterNames)]
    pub fn parameter_names(&self) -> PyDomStringList {
        let (inner, _) = self.inner.parameter_names().copy();
        PyDomStringList { inner }
    }

    #[pyo3(name = "addParameters")]
    pub fn add_parameters(&mut self, params: Vec<(String, Bound<'_, PyAny>)>) -> PyResult<()> {
        let converted = params
            .iter()
            .map(|(name, value)| Ok((name.as_str(), param_from_py(value)?)))
            .collect::<PyResult<Vec<_>>>()?;
        self.inner.add_parameters(converted).map_err(to_py_err)?;
        for (name, value) in params {
            if value.is_callable() {
                self.callbacks.insert(name.to_lowercase(), value.unbind());
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(|e| DOMException::new_err(e.to_string()))
    }

    fn __deepcopy__(&self, py: Python<'_>, _memo: &Bound<'_, PyAny>) -> Self {
        Self {
            inner: self.inner.deep_copy(),
            callbacks: self.callbacks.iter().map(|(k, cb)| (k.clone(), cb.clone_ref(py))).collect(),
        }
    }
}

pub(crate) fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDomStringList>()?;
    m.add_class::<PyNameList>()?;
    m.add_class::<PyDomConfiguration>()?;
    m.add("DOMException", m.py().get_type::<DOMException>())?;
    Ok(())
}
