use crate::error;
use crate::interop::{from_js, new_obj, set_kv, to_js};
use crate::Editor;
use js_sys::Uint32Array;
use std::sync::Once;
use vertexpad::algorithms::reconstruct::Reconstruction;
use vertexpad::render::Scene;
use vertexpad::results::ResultKind;
use vertexpad::{EditorConfig, HighlightKind, Pick, ServiceError, Tool, Vec2};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

static LOGGER: Once = Once::new();

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Routes `log` output to the browser console. The first call installs the
/// logger; later calls only change the level.
#[wasm_bindgen]
pub fn init_logging(level: &str) -> bool {
    let lvl = level.parse::<log::Level>().unwrap_or(log::Level::Info);
    let mut installed = false;
    LOGGER.call_once(|| {
        installed = console_log::init_with_level(lvl).is_ok();
        if !installed {
            web_sys::console::warn_1(&"vertexpad: another logger is already installed".into());
        }
    });
    log::set_max_level(lvl.to_level_filter());
    installed
}

fn parse_kind(kind: &str) -> Result<HighlightKind, JsValue> {
    kind.parse::<HighlightKind>().map_err(|k| error::unknown_name("unknown_kind", "highlight kind", &k))
}

fn parse_result_kind(kind: &str) -> Result<ResultKind, JsValue> {
    kind.parse::<ResultKind>().map_err(|k| error::unknown_name("unknown_kind", "result kind", &k))
}

fn finite2(x: f32, y: f32) -> Result<Vec2, JsValue> {
    if !x.is_finite() {
        return Err(error::non_finite("x"));
    }
    if !y.is_finite() {
        return Err(error::non_finite("y"));
    }
    Ok(Vec2::new(x, y))
}

fn reconstruction_js(r: &Reconstruction) -> JsValue {
    let obj = new_obj();
    let kind = match r {
        Reconstruction::Path(_) => "path",
        Reconstruction::Unreachable => "unreachable",
        Reconstruction::Truncated(_) => "truncated",
    };
    let vertices: Vec<u32> = r.vertices().iter().map(|v| *v as u32).collect();
    set_kv(&obj, "kind", &JsValue::from_str(kind));
    set_kv(&obj, "vertices", &crate::interop::arr_u32(&vertices).into());
    obj.into()
}

fn stored<T: serde::Serialize>(slot: &Option<Result<T, ServiceError>>) -> JsValue {
    match slot {
        None => error::ok(JsValue::NULL),
        Some(Ok(v)) => error::ok(to_js(v)),
        Some(Err(e)) => error::service(e),
    }
}

fn unit_res(r: Result<(), ServiceError>) -> JsValue {
    match r {
        Ok(()) => error::ok(JsValue::TRUE),
        Err(e) => error::service(&e),
    }
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor {
        init_logging("info");
        crate::Editor::rs_new(EditorConfig::default())
    }
    pub fn version(&self) -> u64 {
        self.rs_version()
    }

    // Config
    pub fn config(&self) -> JsValue {
        to_js(self.inner.config())
    }
    pub fn set_config_res(&mut self, cfg: JsValue) -> JsValue {
        let v = match from_js(cfg) {
            Ok(v) => v,
            Err(e) => return error::err("json_parse", e.to_string(), None),
        };
        match EditorConfig::from_json_value(v).and_then(|c| self.inner.set_config(c)) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::config(&e),
        }
    }

    // Tools
    pub fn tool(&self) -> String {
        self.inner.tool().name().to_string()
    }
    pub fn is_tool_enabled(&self, name: &str) -> bool {
        name.parse::<Tool>().map_or(false, |t| self.inner.is_tool_enabled(t))
    }
    pub fn select_tool(&mut self, name: &str) -> bool {
        match name.parse::<Tool>() {
            Ok(t) => self.inner.select_tool(t).is_ok(),
            Err(_) => false,
        }
    }
    pub fn select_tool_res(&mut self, name: &str) -> JsValue {
        let t = match name.parse::<Tool>() {
            Ok(t) => t,
            Err(got) => return error::unknown_name("unknown_tool", "tool", &got),
        };
        match self.inner.select_tool(t) {
            Ok(()) => error::ok(JsValue::from_str(t.name())),
            Err(e) => error::edit(&e),
        }
    }
    pub fn gesture(&self) -> JsValue {
        to_js(&self.inner.gesture())
    }

    // Pointer
    pub fn pointer_down(&mut self, x: f32, y: f32) -> JsValue {
        to_js(&self.inner.pointer_down(Vec2::new(x, y)))
    }
    pub fn pointer_down_res(&mut self, x: f32, y: f32) -> JsValue {
        match finite2(x, y) {
            Ok(p) => error::ok(to_js(&self.inner.pointer_down(p))),
            Err(e) => e,
        }
    }
    pub fn pointer_move(&mut self, x: f32, y: f32) -> JsValue {
        to_js(&self.inner.pointer_move(Vec2::new(x, y)))
    }
    pub fn pointer_move_res(&mut self, x: f32, y: f32) -> JsValue {
        match finite2(x, y) {
            Ok(p) => error::ok(to_js(&self.inner.pointer_move(p))),
            Err(e) => e,
        }
    }
    pub fn pointer_up(&mut self, x: f32, y: f32) -> JsValue {
        to_js(&self.inner.pointer_up(Vec2::new(x, y)))
    }
    pub fn pointer_up_res(&mut self, x: f32, y: f32) -> JsValue {
        // Non-finite release still ends the gesture.
        let fx = self.inner.pointer_up(Vec2::new(x, y));
        match finite2(x, y) {
            Ok(_) => error::ok(to_js(&fx)),
            Err(e) => e,
        }
    }

    // Edit requests
    pub fn pending_edit(&self) -> JsValue {
        self.inner.pending_edit().map_or(JsValue::NULL, to_js)
    }
    pub fn commit_edit(&mut self, input: &str) -> bool {
        self.inner.commit_edit(input).is_ok()
    }
    pub fn commit_edit_res(&mut self, input: &str) -> JsValue {
        match self.inner.commit_edit(input) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::edit(&e),
        }
    }
    pub fn cancel_edit(&mut self) -> bool {
        self.inner.cancel_edit()
    }

    // Store
    pub fn node_count(&self) -> u32 {
        self.inner.graph().node_count()
    }
    pub fn edge_count(&self) -> u32 {
        self.inner.graph().edge_count()
    }
    pub fn is_directed(&self) -> bool {
        self.inner.graph().is_directed()
    }
    pub fn set_directed_res(&mut self, directed: bool) -> JsValue {
        match self.inner.with_graph(|g| g.set_directed(directed)) {
            Ok(()) => error::ok(JsValue::from_bool(directed)),
            Err(e) => error::graph(&e),
        }
    }
    pub fn add_node(&mut self, x: f32, y: f32) -> u32 {
        self.inner.with_graph(|g| g.add_node(x, y))
    }
    pub fn add_node_res(&mut self, x: f32, y: f32) -> JsValue {
        match finite2(x, y) {
            Ok(p) => error::ok(JsValue::from_f64(self.inner.with_graph(|g| g.add_node(p.x, p.y)) as f64)),
            Err(e) => e,
        }
    }
    pub fn move_node(&mut self, id: u32, x: f32, y: f32) -> bool {
        self.inner.with_graph(|g| g.move_node(id, x, y))
    }
    pub fn move_node_res(&mut self, id: u32, x: f32, y: f32) -> JsValue {
        if let Err(e) = finite2(x, y) {
            return e;
        }
        if self.inner.graph().node(id).is_none() {
            return error::invalid_id("node", id);
        }
        error::ok(JsValue::from_bool(self.inner.with_graph(|g| g.move_node(id, x, y))))
    }
    pub fn get_node(&self, id: u32) -> JsValue {
        self.inner.graph().node(id).map_or(JsValue::NULL, to_js)
    }
    pub fn get_node_res(&self, id: u32) -> JsValue {
        match self.inner.graph().node(id) {
            Some(n) => error::ok(to_js(n)),
            None => error::invalid_id("node", id),
        }
    }
    pub fn get_edge(&self, id: u32) -> JsValue {
        self.inner.graph().edge(id).map_or(JsValue::NULL, to_js)
    }
    pub fn remove_node(&mut self, id: u32) -> bool {
        self.inner.with_graph(|g| g.remove_node(id)).is_ok()
    }
    pub fn remove_node_res(&mut self, id: u32) -> JsValue {
        match self.inner.with_graph(|g| g.remove_node(id)) {
            Ok(edges) => error::ok(crate::interop::arr_u32(&edges).into()),
            Err(e) => error::graph(&e),
        }
    }
    pub fn add_edge(&mut self, a: u32, b: u32, directed: bool) -> Option<u32> {
        self.inner.with_graph(|g| g.add_edge(a, b, directed)).ok()
    }
    pub fn add_edge_res(&mut self, a: u32, b: u32, directed: bool) -> JsValue {
        match self.inner.with_graph(|g| g.add_edge(a, b, directed)) {
            Ok(eid) => error::ok(JsValue::from_f64(eid as f64)),
            Err(e) => error::graph(&e),
        }
    }
    pub fn add_loop_res(&mut self, node: u32) -> JsValue {
        match self.inner.with_graph(|g| g.add_loop(node, g.is_directed())) {
            Ok(eid) => error::ok(JsValue::from_f64(eid as f64)),
            Err(e) => error::graph(&e),
        }
    }
    pub fn remove_edge(&mut self, id: u32) -> bool {
        self.inner.with_graph(|g| g.remove_edge(id)).is_ok()
    }
    pub fn remove_edge_res(&mut self, id: u32) -> JsValue {
        match self.inner.with_graph(|g| g.remove_edge(id)) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::graph(&e),
        }
    }
    pub fn rename_node(&mut self, id: u32, label: &str) -> bool {
        self.inner.with_graph(|g| g.rename_node(id, label)).is_ok()
    }
    pub fn rename_node_res(&mut self, id: u32, label: &str) -> JsValue {
        match self.inner.with_graph(|g| g.rename_node(id, label)) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::graph(&e),
        }
    }
    pub fn set_edge_weight(&mut self, id: u32, input: &str) -> bool {
        self.inner.with_graph(|g| g.set_edge_weight(id, input)).is_ok()
    }
    pub fn set_edge_weight_res(&mut self, id: u32, input: &str) -> JsValue {
        match self.inner.with_graph(|g| g.set_edge_weight(id, input)) {
            Ok(w) => error::ok(JsValue::from_f64(w)),
            Err(e) => error::graph(&e),
        }
    }
    pub fn set_edge_curvature_res(&mut self, id: u32, value: f32) -> JsValue {
        match self.inner.with_graph(|g| g.set_edge_curvature(id, value)) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::graph(&e),
        }
    }
    /// Fan or pinned offset; the drawn curve mirrors it for auto-fanned reversed edges.
    pub fn effective_curvature(&self, id: u32) -> Option<f32> {
        self.inner.graph().effective_curvature(id, self.inner.config())
    }

    // Typed arrays getters
    pub fn get_node_data(&self) -> JsValue {
        let (ids, pos) = self.inner.graph().get_node_arrays();
        let obj = new_obj();
        set_kv(&obj, "ids", &crate::interop::arr_u32(&ids).into());
        set_kv(&obj, "positions", &crate::interop::arr_f32(&pos).into());
        obj.into()
    }
    pub fn get_edge_data(&self) -> JsValue {
        let ea = self.inner.graph().get_edge_arrays();
        let obj = new_obj();
        set_kv(&obj, "ids", &crate::interop::arr_u32(&ea.ids).into());
        set_kv(&obj, "endpoints", &crate::interop::arr_u32(&ea.endpoints).into());
        set_kv(&obj, "directed", &crate::interop::arr_u8(&ea.directed).into());
        set_kv(&obj, "weights", &crate::interop::arr_f32(&ea.weights).into());
        obj.into()
    }

    // Picking
    pub fn pick(&self, x: f32, y: f32) -> JsValue {
        if let Some(p) = self.inner.graph().pick(Vec2::new(x, y), self.inner.config()) {
            let obj = new_obj();
            match p {
                Pick::Node { id, dist } => {
                    set_kv(&obj, "kind", &JsValue::from_str("node"));
                    set_kv(&obj, "id", &JsValue::from_f64(id as f64));
                    set_kv(&obj, "dist", &JsValue::from_f64(dist as f64));
                }
                Pick::Edge { id, dist } => {
                    set_kv(&obj, "kind", &JsValue::from_str("edge"));
                    set_kv(&obj, "id", &JsValue::from_f64(id as f64));
                    set_kv(&obj, "dist", &JsValue::from_f64(dist as f64));
                }
            }
            obj.into()
        } else {
            JsValue::NULL
        }
    }
    pub fn pick_res(&self, x: f32, y: f32) -> JsValue {
        match finite2(x, y) {
            Ok(_) => error::ok(self.pick(x, y)),
            Err(e) => e,
        }
    }

    // Highlight
    pub fn highlight(&self) -> JsValue {
        to_js(self.inner.highlight())
    }
    pub fn set_highlight_res(&mut self, nodes: &Uint32Array, edges: &Uint32Array, kind: &str) -> JsValue {
        match parse_kind(kind) {
            Ok(k) => {
                self.inner.set_highlight(&nodes.to_vec(), &edges.to_vec(), k);
                error::ok(JsValue::TRUE)
            }
            Err(e) => e,
        }
    }
    pub fn toggle_highlight_res(&mut self, kind: &str, nodes: &Uint32Array, edges: &Uint32Array) -> JsValue {
        match parse_kind(kind) {
            Ok(k) => {
                self.inner.toggle_highlight(k, &nodes.to_vec(), &edges.to_vec());
                error::ok(to_js(&self.inner.highlight().kind()))
            }
            Err(e) => e,
        }
    }
    pub fn clear_highlight(&mut self) {
        self.inner.clear_highlight();
    }
    pub fn toggle_path_res(&mut self, kind: &str) -> JsValue {
        match parse_kind(kind) {
            Ok(k @ (HighlightKind::Euler | HighlightKind::Hamilton)) => {
                error::ok(JsValue::from_bool(self.inner.toggle_path(k)))
            }
            Ok(_) => error::unknown_name("unknown_kind", "path kind", kind),
            Err(e) => e,
        }
    }
    pub fn probe_floyd(&mut self, i: u32, j: u32) -> JsValue {
        self.inner
            .probe_floyd(i as usize, j as usize)
            .map_or(JsValue::NULL, |r| reconstruction_js(&r))
    }
    pub fn probe_floyd_step(&mut self, step: u32, i: u32, j: u32) -> JsValue {
        self.inner
            .probe_floyd_step(step as usize, i as usize, j as usize)
            .map_or(JsValue::NULL, |r| reconstruction_js(&r))
    }

    // Coloring and canvas
    pub fn toggle_coloring(&mut self) -> bool {
        self.inner.toggle_coloring()
    }
    pub fn coloring_active(&self) -> bool {
        self.inner.coloring_active()
    }
    pub fn clear_canvas(&mut self) {
        self.inner.clear_canvas();
    }

    // Service boundary
    pub fn service_request(&self, start: Option<u32>, end: Option<u32>) -> JsValue {
        to_js(&self.inner.service_request(start, end))
    }
    pub fn begin_algorithm_res(&mut self, kind: &str, start: Option<u32>, end: Option<u32>) -> JsValue {
        let k = match parse_result_kind(kind) {
            Ok(k) => k,
            Err(e) => return e,
        };
        match self.inner.begin_algorithm(k, start, end) {
            Ok(req) => error::ok(to_js(&req)),
            Err(e) => error::edit(&e),
        }
    }
    pub fn apply_analysis_res(&mut self, snapshot: JsValue, body: JsValue) -> JsValue {
        let snapshot = match serde_wasm_bindgen::from_value(snapshot) {
            Ok(s) => s,
            Err(e) => return error::err("json_parse", e.to_string(), None),
        };
        match from_js(body) {
            Ok(v) => unit_res(self.inner.apply_analysis(snapshot, v)),
            Err(e) => error::err("json_parse", e.to_string(), None),
        }
    }
    pub fn apply_solutions_res(&mut self, body: JsValue) -> JsValue {
        match from_js(body) {
            Ok(v) => unit_res(self.inner.apply_solutions(v)),
            Err(e) => error::err("json_parse", e.to_string(), None),
        }
    }
    pub fn apply_dijkstra_res(&mut self, body: JsValue) -> JsValue {
        match from_js(body) {
            Ok(v) => unit_res(self.inner.apply_dijkstra(v)),
            Err(e) => error::err("json_parse", e.to_string(), None),
        }
    }
    pub fn apply_traversal_res(&mut self, kind: &str, body: JsValue) -> JsValue {
        let k = match parse_result_kind(kind) {
            Ok(k @ (ResultKind::Dfs | ResultKind::Bfs)) => k,
            Ok(_) => return error::unknown_name("unknown_kind", "traversal kind", kind),
            Err(e) => return e,
        };
        match from_js(body) {
            Ok(v) => unit_res(self.inner.apply_traversal(k, v)),
            Err(e) => error::err("json_parse", e.to_string(), None),
        }
    }
    pub fn apply_floyd_res(&mut self, body: JsValue) -> JsValue {
        match from_js(body) {
            Ok(v) => unit_res(self.inner.apply_floyd(v)),
            Err(e) => error::err("json_parse", e.to_string(), None),
        }
    }
    pub fn record_failure_res(&mut self, kind: &str, message: &str) -> JsValue {
        match parse_result_kind(kind) {
            Ok(k) => {
                self.inner.record_failure(k, ServiceError::Transport(message.to_string()));
                error::ok(JsValue::TRUE)
            }
            Err(e) => e,
        }
    }
    pub fn clear_result_res(&mut self, kind: &str) -> JsValue {
        match parse_result_kind(kind) {
            Ok(k) => {
                self.inner.clear_result(k);
                error::ok(JsValue::TRUE)
            }
            Err(e) => e,
        }
    }
    pub fn result_res(&self, kind: &str) -> JsValue {
        let r = self.inner.results();
        match parse_result_kind(kind) {
            Ok(ResultKind::Analysis) => match &r.analysis {
                None => error::ok(JsValue::NULL),
                Some(Ok(entry)) => {
                    let obj = new_obj();
                    set_kv(&obj, "snapshot", &to_js(&entry.snapshot));
                    set_kv(&obj, "report", &to_js(&entry.report));
                    error::ok(obj.into())
                }
                Some(Err(e)) => error::service(e),
            },
            Ok(ResultKind::Solutions) => stored(&r.solutions),
            Ok(ResultKind::Dijkstra) => stored(&r.dijkstra),
            Ok(ResultKind::Dfs) => stored(&r.dfs),
            Ok(ResultKind::Bfs) => stored(&r.bfs),
            Ok(ResultKind::Floyd) => stored(&r.floyd),
            Err(e) => e,
        }
    }

    // Rendering
    pub fn scene(&self) -> JsValue {
        to_js(&Scene::build(&self.inner))
    }
    pub fn to_svg(&self, width: f32, height: f32) -> String {
        vertexpad::to_svg_document(&Scene::build(&self.inner), width, height)
    }
    pub fn to_svg_paths(&self) -> JsValue {
        to_js(&self.inner.graph().to_svg_paths(self.inner.config()))
    }

    // Persistence
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.graph().to_json_value())
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        match from_js(v) {
            Ok(val) => self.inner.load_graph(val, false).unwrap_or(false),
            Err(_) => false,
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match from_js(v) {
            Ok(val) => match self.inner.load_graph(val, true) {
                Ok(ok) => error::ok(JsValue::from_bool(ok)),
                Err((code, msg)) => error::err(code, msg, None),
            },
            Err(e) => error::err("json_parse", format!("{}", e), None),
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new()
    }
}
