use proc_macro::TokenStream;

mod derive_utils;
mod message;

use message::MessageRole;

/// 命令宏
/// - 合并派生 `Clone`、`Debug`（已有派生保留）
/// - 为目标类型实现 `::mediator::Command`
/// - 支持参数：`#[command(name = "user.create")]`，默认使用类型名作为 `NAME`
#[proc_macro_attribute]
pub fn command(attr: TokenStream, item: TokenStream) -> TokenStream {
    message::expand(MessageRole::Command, attr, item)
}

/// 事件宏
/// - 合并派生 `Clone`、`Debug`
/// - 为目标类型实现 `::mediator::Event`
/// - 支持参数：`#[event(name = "user.created")]`
#[proc_macro_attribute]
pub fn event(attr: TokenStream, item: TokenStream) -> TokenStream {
    message::expand(MessageRole::Event, attr, item)
}
