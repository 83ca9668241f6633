use js_sys::{Reflect, Uint32Array};
use vertexpad_wasm::Editor;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

#[wasm_bindgen_test]
fn invalid_ids_return_typed_errors() {
    let mut ed = Editor::new();
    let ver = ed.version();
    assert!(is_err(&ed.move_node_res(12345, 0.0, 0.0), "invalid_id"));
    assert_eq!(ed.version(), ver, "state mutated on error");
    assert!(is_err(&ed.remove_edge_res(9999), "invalid_id"));
    assert!(is_err(&ed.rename_node_res(7, "x"), "invalid_id"));
    assert_eq!(ed.version(), ver);
}

#[wasm_bindgen_test]
fn label_and_weight_validation() {
    let mut ed = Editor::new();
    let a = ed.add_node(0.0, 0.0);
    let b = ed.add_node(10.0, 0.0);
    assert!(is_err(&ed.rename_node_res(a, "v1"), "duplicate_label"));
    assert!(is_err(&ed.rename_node_res(a, "   "), "empty_label"));
    let e = ed.add_edge(a, b, false).unwrap();
    assert!(is_err(&ed.set_edge_weight_res(e, "-3"), "invalid_weight"));
    assert!(is_err(&ed.set_edge_weight_res(e, "abc"), "invalid_weight"));
    assert!(is_err(&ed.set_edge_curvature_res(e, f32::NAN), "non_finite"));
}

#[wasm_bindgen_test]
fn structural_errors() {
    let mut ed = Editor::new();
    let a = ed.add_node(0.0, 0.0);
    let b = ed.add_node(10.0, 0.0);
    assert!(is_err(&ed.add_edge_res(a, a, false), "same_endpoints"));
    ed.add_edge(a, b, true).unwrap();
    assert!(is_err(&ed.add_edge_res(b, a, false), "directedness_conflict"));
    assert!(is_err(&ed.set_directed_res(false), "directedness_conflict"));
    assert!(is_err(&ed.select_tool_res("edge"), "tool_disabled"));
    assert!(is_err(&ed.select_tool_res("lasso"), "unknown_tool"));
}

#[wasm_bindgen_test]
fn edit_and_result_errors() {
    let mut ed = Editor::new();
    assert!(is_err(&ed.commit_edit_res("x"), "no_pending_edit"));
    assert!(is_err(&ed.pointer_down_res(f32::NAN, 0.0), "non_finite"));
    assert!(is_err(&ed.toggle_path_res("dfs"), "unknown_kind"));
    assert!(is_err(&ed.clear_result_res("prim"), "unknown_kind"));
    let empty = Uint32Array::new_with_length(0);
    assert!(is_err(&ed.set_highlight_res(&empty, &empty, "sparkle"), "unknown_kind"));

    let body = js_sys::JSON::parse(r#"{"error":"graph is empty"}"#).unwrap();
    assert!(is_err(&ed.apply_solutions_res(body), "service"));
    assert!(is_err(&ed.result_res("solutions"), "service"));
    assert!(is_err(&ed.begin_algorithm_res("dijkstra", Some(40), None), "invalid_id"));
}

#[wasm_bindgen_test]
fn strict_json_errors() {
    let mut ed = Editor::new();
    let doc = js_sys::JSON::parse(
        r#"{"nodes":[{"id":0,"x":0,"y":0,"label":"a"},{"id":1,"x":1,"y":0,"label":"a"}]}"#,
    )
    .unwrap();
    assert!(is_err(&ed.from_json_res(doc), "duplicate_label"));
    let cfg = js_sys::JSON::parse(r#"{"palette":[]}"#).unwrap();
    assert!(is_err(&ed.set_config_res(cfg), "invalid_config"));
}
