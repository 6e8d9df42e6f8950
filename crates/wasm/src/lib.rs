use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use vlookup_sheet::{Export, Side, SourceFile, Table, TableData, Workbench};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log!("vlookup WASM initialized");
}

/// A loaded table as the page shows it: label, column pickers and size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub name: String,
    pub headers: Vec<String>,
    pub row_count: usize,
}

impl From<&Table> for TableSummary {
    fn from(table: &Table) -> Self {
        TableSummary {
            name: table.name.clone(),
            headers: table.data.headers().to_vec(),
            row_count: table.data.row_count(),
        }
    }
}

fn parse_side(side: &str) -> Result<Side, String> {
    side.parse().map_err(|e: vlookup_sheet::SheetError| e.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Resolves on the next macrotask so the page can paint before a long join.
async fn next_macrotask() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window()
            .map(|w| w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0));
        // no window (worker or test harness): settle as a microtask instead
        if !matches!(scheduled, Some(Ok(_))) {
            let _ = resolve.call0(&JsValue::UNDEFINED);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

/// One lookup session: two tables, three column selections, a merged result.
#[wasm_bindgen]
#[derive(Default)]
pub struct VlookupSession {
    bench: Rc<RefCell<Workbench>>,
}

// Native-callable surface. The JS methods below are thin wrappers over it.
impl VlookupSession {
    pub fn load_file_bytes(
        &self,
        side: &str,
        name: &str,
        bytes: &[u8],
    ) -> Result<TableSummary, String> {
        let side = parse_side(side)?;
        let file = SourceFile::new(name, bytes);
        let mut bench = self.bench.borrow_mut();
        bench
            .load_source(side, &file)
            .map(TableSummary::from)
            .map_err(|e| e.to_string())
    }

    pub fn load_text_str(&self, side: &str, text: &str) -> Result<TableSummary, String> {
        let side = parse_side(side)?;
        let mut bench = self.bench.borrow_mut();
        bench
            .load_pasted(side, text)
            .map(TableSummary::from)
            .map_err(|e| e.to_string())
    }

    pub fn clear_side(&self, side: &str) -> Result<(), String> {
        let side = parse_side(side)?;
        self.bench.borrow_mut().clear(side);
        Ok(())
    }

    pub fn headers_of(&self, side: &str) -> Result<Vec<String>, String> {
        let side = parse_side(side)?;
        Ok(self.bench.borrow().headers(side).to_vec())
    }

    pub fn table_data(&self, side: &str) -> Result<Option<TableData>, String> {
        let side = parse_side(side)?;
        Ok(self.bench.borrow().table(side).map(|t| t.data.clone()))
    }

    pub fn merged_data(&self) -> Option<TableData> {
        self.bench.borrow().merged().cloned()
    }

    pub fn merge_now(&self) -> Result<TableData, String> {
        let mut bench = self.bench.borrow_mut();
        bench.merge().cloned().map_err(|e| e.to_string())
    }

    pub fn export_payload(&self) -> Result<Export, String> {
        self.bench.borrow_mut().export().map_err(|e| e.to_string())
    }

    pub fn current_error(&self) -> Option<String> {
        self.bench.borrow().error().map(str::to_string)
    }
}

#[wasm_bindgen]
impl VlookupSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(js_name = loadFile)]
    pub fn load_file(&self, side: &str, name: &str, bytes: &[u8]) -> Result<JsValue, JsValue> {
        #[cfg(debug_assertions)]
        console_log!("Loading {} ({} bytes) into {}", name, bytes.len(), side);

        let summary = self.load_file_bytes(side, name, bytes).map_err(js_err)?;
        to_js(&summary)
    }

    #[wasm_bindgen(js_name = loadText)]
    pub fn load_text(&self, side: &str, text: &str) -> Result<JsValue, JsValue> {
        let summary = self.load_text_str(side, text).map_err(js_err)?;
        to_js(&summary)
    }

    pub fn clear(&self, side: &str) -> Result<(), JsValue> {
        self.clear_side(side).map_err(js_err)
    }

    #[wasm_bindgen(js_name = setLookupColumn)]
    pub fn set_lookup_column(&self, column: &str) {
        self.bench.borrow_mut().set_lookup_column(column);
    }

    #[wasm_bindgen(js_name = setMatchColumn)]
    pub fn set_match_column(&self, column: &str) {
        self.bench.borrow_mut().set_match_column(column);
    }

    #[wasm_bindgen(js_name = setReturnColumn)]
    pub fn set_return_column(&self, column: &str) {
        self.bench.borrow_mut().set_return_column(column);
    }

    #[wasm_bindgen(js_name = canMerge)]
    pub fn can_merge(&self) -> bool {
        self.bench.borrow().can_merge()
    }

    pub fn headers(&self, side: &str) -> Result<Vec<String>, JsValue> {
        self.headers_of(side).map_err(js_err)
    }

    pub fn table(&self, side: &str) -> Result<JsValue, JsValue> {
        let table = self.table_data(side).map_err(js_err)?;
        to_js(&table)
    }

    pub fn merged(&self) -> Result<JsValue, JsValue> {
        to_js(&self.merged_data())
    }

    /// Join after yielding one macrotask. Resolves to the merged table.
    pub fn merge(&self) -> js_sys::Promise {
        self.bench.borrow_mut().dismiss_error();
        let bench = Rc::clone(&self.bench);
        wasm_bindgen_futures::future_to_promise(async move {
            next_macrotask().await;
            let mut bench = bench.borrow_mut();
            let merged = bench.merge().map_err(|e| js_err(e.to_string()))?;

            #[cfg(debug_assertions)]
            console_log!("Merged {} rows", merged.row_count());

            to_js(merged)
        })
    }

    #[wasm_bindgen(js_name = exportCsv)]
    pub fn export_csv(&self) -> Result<JsValue, JsValue> {
        let export = self.export_payload().map_err(js_err)?;
        to_js(&export)
    }

    pub fn error(&self) -> Option<String> {
        self.current_error()
    }
}

#[wasm_bindgen(js_name = parseCsv)]
pub fn parse_csv(text: &str) -> Result<JsValue, JsValue> {
    to_js(&TableData::from_csv_str(text))
}

#[wasm_bindgen(js_name = serializeCsv)]
pub fn serialize_csv(table: JsValue) -> Result<String, JsValue> {
    let table: TableData =
        serde_wasm_bindgen::from_value(table).map_err(|e| js_err(e.to_string()))?;
    table.to_csv_string().map_err(|e| js_err(e.to_string()))
}
