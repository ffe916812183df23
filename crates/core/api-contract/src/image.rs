/// 图片引用规范化。
///
/// - 空值 → None
/// - 已是 `http://` / `https://` 绝对地址 → 原样返回
/// - 否则拼接上传根地址，保证中间恰好一个 `/`
pub fn normalize_image_url(raw: Option<&str>, upload_base: &str) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(raw.to_string());
    }
    let base = upload_base.trim_end_matches('/');
    let separator = if raw.starts_with('/') { "" } else { "/" };
    Some(format!("{base}{separator}{raw}"))
}
