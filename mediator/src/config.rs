use serde::{Deserialize, Serialize};

/// 中介者配置
///
/// 关闭某个开关只会停止发布对应的元事件，`EventRaised` 的递归保护不受影响。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediatorConfig {
    /// 命令处理成功后发布 `CommandExecuted`
    pub emit_command_executed: bool,
    /// 事件发布后发布 `EventRaised`
    pub emit_event_raised: bool,
}

impl Default for MediatorConfig {
    fn default() -> Self {
        Self {
            emit_command_executed: true,
            emit_event_raised: true,
        }
    }
}
