use crate::kind::Kind;

/// 事件（Event）
///
/// 描述“已发生的事实”，可被零个或多个观察者处理；实例身份无意义。
/// 事件以 `&mut` 在观察者之间依次传递，前一个观察者的修改对后续观察者与调用方可见。
pub trait Event: Clone + Send + Sync + 'static {
    /// 事件的稳定名称
    const NAME: &'static str;

    fn kind() -> Kind {
        Kind::named::<Self>(Self::NAME)
    }
}
