// ==========================================
// 工厂生产跟踪系统 - 批次号计算
// ==========================================
// 规则: 批次号按 (SKU, 日历日) 分配，从 "001" 起
// 采用 max+1 而非 count+1，容忍历史号段中出现空洞
// ==========================================

/// 3 位补零宽度
const PAD_WIDTH: usize = 3;

/// 计算下一个批次号
///
/// # 参数
/// - existing: 同一 SKU 当日已有的批次号
///
/// # 规则
/// - 无已有批次 → "001"
/// - 否则取已有号的整数最大值 +1（无法解析的号忽略）
/// - 超过补零宽度的值按自然位数输出（如 1000 → "1000"）
pub fn next_batch_number<'a>(existing: impl Iterator<Item = &'a str>) -> String {
    let max = existing
        .filter_map(|n| n.trim().parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format_batch_number(max + 1)
}

/// 格式化批次号（3 位补零）
pub fn format_batch_number(seq: u32) -> String {
    format!("{:0width$}", seq, width = PAD_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_batch_of_day() {
        assert_eq!(next_batch_number(std::iter::empty()), "001");
    }

    #[test]
    fn test_max_plus_one_not_count_plus_one() {
        // 号段有空洞时仍按最大值递增，避免与历史号冲突
        let existing = ["001", "002", "005"];
        assert_eq!(next_batch_number(existing.iter().copied()), "006");
    }

    #[test]
    fn test_padding_rollover() {
        let existing = ["009"];
        assert_eq!(next_batch_number(existing.iter().copied()), "010");
    }

    #[test]
    fn test_natural_width_beyond_padding() {
        assert_eq!(format_batch_number(999), "999");
        assert_eq!(format_batch_number(1000), "1000");

        let existing = ["999"];
        assert_eq!(next_batch_number(existing.iter().copied()), "1000");
        let existing = ["1000"];
        assert_eq!(next_batch_number(existing.iter().copied()), "1001");
    }

    #[test]
    fn test_unparseable_numbers_ignored() {
        let existing = ["001", "abc", ""];
        assert_eq!(next_batch_number(existing.iter().copied()), "002");
    }
}
