/// 界面与内容语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    /// 中文
    Zh,
    /// 英文
    En,
}

/// 使用中文界面的地区代码：中国大陆、台湾、香港、澳门、新加坡
pub const CHINESE_REGIONS: [&str; 5] = ["CN", "TW", "HK", "MO", "SG"];

impl Locale {
    /// 探测失败时使用的默认语言
    pub const FALLBACK: Locale = Locale::Zh;

    /// 根据国家代码映射语言
    pub fn from_country_code(code: &str) -> Self {
        if CHINESE_REGIONS.contains(&code) {
            Locale::Zh
        } else {
            Locale::En
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" | "中文" => Some(Locale::Zh),
            "en" | "en-us" | "english" => Some(Locale::En),
            _ => None,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// 语言配置：自动探测或固定语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocaleSetting {
    #[default]
    Auto,
    Fixed(Locale),
}

impl LocaleSetting {
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Some(LocaleSetting::Auto);
        }
        Locale::parse(s).map(LocaleSetting::Fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chinese_regions_map_to_zh() {
        for code in CHINESE_REGIONS {
            assert_eq!(Locale::from_country_code(code), Locale::Zh, "{}", code);
        }
    }

    #[test]
    fn test_other_regions_map_to_en() {
        for code in ["US", "GB", "JP", "DE", "cn", "XX"] {
            assert_eq!(Locale::from_country_code(code), Locale::En, "{}", code);
        }
    }

    #[test]
    fn test_locale_setting_parse() {
        assert_eq!(LocaleSetting::parse("AUTO"), Some(LocaleSetting::Auto));
        assert_eq!(
            LocaleSetting::parse("en"),
            Some(LocaleSetting::Fixed(Locale::En))
        );
        assert_eq!(
            LocaleSetting::parse(" zh "),
            Some(LocaleSetting::Fixed(Locale::Zh))
        );
        assert_eq!(LocaleSetting::parse("fr"), None);
    }
}
