//! wasm32 目标下的 JavaScript 绑定。

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::{
    DisabledTrack, DisplayParser, InlineContext, MediaType, Metadata, SubtitleState,
    model::media::parse_named, render_inline,
};

/// 模块加载时安装 panic 钩子和日志。
#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    Ok(())
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// 暴露给 JavaScript 的显示树解析器。
#[wasm_bindgen]
pub struct WasmDisplayParser {
    parser: DisplayParser,
}

#[wasm_bindgen]
impl WasmDisplayParser {
    /// 以给定格式字符串创建解析器。
    #[wasm_bindgen(constructor)]
    pub fn new(format: &str) -> WasmDisplayParser {
        Self {
            parser: DisplayParser::with_format(format),
        }
    }

    /// 重新编译格式字符串。
    #[wasm_bindgen(js_name = takeFormatString)]
    pub fn take_format_string(&self, format: &str) {
        self.parser.take_format_string(format);
    }

    /// `metadata_js` 是一个普通 JS 对象，值会被转换为文本。
    #[wasm_bindgen(js_name = parseMetadata)]
    pub fn parse_metadata(
        &self,
        metadata_js: JsValue,
        display_string: &str,
        media_type: &str,
    ) -> Result<String, JsValue> {
        let value: serde_json::Value = serde_wasm_bindgen::from_value(metadata_js)?;
        let metadata = Metadata::from_json(&value);
        let media_type: MediaType = parse_named(media_type).map_err(to_js_error)?;
        Ok(self
            .parser
            .parse_metadata(&metadata, display_string, media_type))
    }
}

/// 按行内格式渲染，`context_js` 的字段使用驼峰命名。
#[wasm_bindgen(js_name = renderInline)]
pub fn render_inline_js(format: &str, context_js: JsValue) -> Result<String, JsValue> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct OwnedContext {
        file_name: String,
        #[serde(default)]
        disabled: Option<String>,
        #[serde(default)]
        subtitles: Option<String>,
        #[serde(default)]
        time_nav: f64,
        #[serde(default)]
        time_begin: f64,
        #[serde(default)]
        time_end: f64,
    }

    let owned: OwnedContext = serde_wasm_bindgen::from_value(context_js)?;
    let disabled = owned
        .disabled
        .as_deref()
        .map(parse_named::<DisabledTrack>)
        .transpose()
        .map_err(to_js_error)?
        .unwrap_or_default();
    let subtitles = owned
        .subtitles
        .as_deref()
        .map(parse_named::<SubtitleState>)
        .transpose()
        .map_err(to_js_error)?
        .unwrap_or_default();

    let context = InlineContext::new(owned.file_name)
        .disabled(disabled)
        .subtitles(subtitles)
        .times(owned.time_nav, owned.time_begin, owned.time_end);
    Ok(render_inline(format, &context))
}
