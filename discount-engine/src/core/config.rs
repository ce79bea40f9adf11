use crate::discount::AnalysisPolicy;

/// 引擎配置 - 折扣分析引擎的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DISCOUNT_STACK_ON_ORIGINAL | true | 所有策略都基于原始购物车总额计算 |
/// | DISCOUNT_CAP_AT_GRAND_TOTAL | false | 有效优惠不超过购物车总额 |
/// | DISCOUNT_RULES_PATH | - | 折扣规则 JSON 文件 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志目录 (按天滚动) |
///
/// # 示例
///
/// ```ignore
/// DISCOUNT_RULES_PATH=./rules.json DISCOUNT_CAP_AT_GRAND_TOTAL=true cargo run --example analyze_cart
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Evaluate every strategy against the undiscounted cart total
    pub stack_on_original: bool,
    /// Bound the effective saving by the cart total
    pub cap_at_grand_total: bool,
    /// JSON file used to seed the in-memory rule store
    pub rules_path: Option<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl EngineConfig {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            stack_on_original: env_flag("DISCOUNT_STACK_ON_ORIGINAL", true),
            cap_at_grand_total: env_flag("DISCOUNT_CAP_AT_GRAND_TOTAL", false),
            rules_path: env_opt("DISCOUNT_RULES_PATH"),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: env_opt("LOG_DIR"),
        }
    }

    /// 使用自定义值覆盖策略配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(stack_on_original: bool, cap_at_grand_total: bool) -> Self {
        let mut config = Self::from_env();
        config.stack_on_original = stack_on_original;
        config.cap_at_grand_total = cap_at_grand_total;
        config
    }

    pub fn policy(&self) -> AnalysisPolicy {
        AnalysisPolicy {
            stack_on_original: self.stack_on_original,
            cap_at_grand_total: self.cap_at_grand_total,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_drive_policy() {
        let config = EngineConfig::with_overrides(false, true);
        assert_eq!(
            config.policy(),
            AnalysisPolicy {
                stack_on_original: false,
                cap_at_grand_total: true,
            }
        );
    }

    #[test]
    fn test_unset_flag_uses_default() {
        assert!(env_flag("DISCOUNT_TEST_FLAG_THAT_IS_NEVER_SET", true));
        assert!(!env_flag("DISCOUNT_TEST_FLAG_THAT_IS_NEVER_SET", false));
        assert_eq!(env_opt("DISCOUNT_TEST_PATH_THAT_IS_NEVER_SET"), None);
    }
}
