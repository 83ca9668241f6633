use crate::interop::{new_obj, set_kv};
use vertexpad::{ConfigError, EditError, GraphError, ServiceError};
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", format!("invalid {} id", kind), Some(d.into()))
}

#[inline]
pub fn unknown_name(code: &'static str, what: &str, got: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "got", &JsValue::from_str(got));
    err(code, format!("unknown {} '{}'", what, got), Some(d.into()))
}

pub fn graph(e: &GraphError) -> JsValue {
    match e {
        GraphError::UnknownNode(id) => invalid_id("node", *id),
        GraphError::UnknownEdge(id) => invalid_id("edge", *id),
        GraphError::NonFinite(p) => non_finite(p),
        GraphError::DuplicateLabel(l) => {
            let d = new_obj(); set_kv(&d, "label", &JsValue::from_str(l));
            err(e.code(), e.to_string(), Some(d.into()))
        }
        GraphError::DirectednessConflict { directed } => {
            let d = new_obj(); set_kv(&d, "directed", &JsValue::from_bool(*directed));
            err(e.code(), e.to_string(), Some(d.into()))
        }
        _ => err(e.code(), e.to_string(), None),
    }
}

pub fn edit(e: &EditError) -> JsValue {
    match e {
        EditError::Rejected(g) => graph(g),
        EditError::ToolDisabled(t) => {
            let d = new_obj(); set_kv(&d, "tool", &JsValue::from_str(t.name()));
            err(e.code(), e.to_string(), Some(d.into()))
        }
        EditError::NoPendingEdit => err(e.code(), e.to_string(), None),
    }
}

pub fn service(e: &ServiceError) -> JsValue {
    let reason = match e {
        ServiceError::Transport(_) => "transport",
        ServiceError::Rejected(_) => "rejected",
        ServiceError::Malformed(_) => "malformed",
    };
    let d = new_obj(); set_kv(&d, "reason", &JsValue::from_str(reason));
    err("service", e.to_string(), Some(d.into()))
}

pub fn config(e: &ConfigError) -> JsValue {
    err("invalid_config", e.to_string(), None)
}
