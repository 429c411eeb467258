use wasm_bindgen::JsValue;
use web_sys::console;

pub fn set_panic_hook() {
    // 开启后 panic 信息会输出到浏览器控制台
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

pub fn log(message: &str) {
    console::log_1(&JsValue::from_str(message));
}

pub fn warn(message: &str) {
    console::warn_1(&JsValue::from_str(message));
}
