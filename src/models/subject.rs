use super::Locale;

/// 科目枚举
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Subject {
    /// 数学
    #[default]
    Math,
    /// 物理
    Physics,
    /// 化学
    Chemistry,
    /// 生物
    Biology,
    /// 语文
    Chinese,
    /// 英语
    English,
    /// 历史
    History,
    /// 地理
    Geography,
    /// 政治
    Politics,
    /// 计算机
    Computer,
    /// 其他
    Other,
}

impl Subject {
    /// 界面展示顺序
    pub const ALL: [Subject; 11] = [
        Subject::Math,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::Chinese,
        Subject::English,
        Subject::History,
        Subject::Geography,
        Subject::Politics,
        Subject::Computer,
        Subject::Other,
    ];

    /// 稳定的英文键
    pub fn key(self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
            Subject::Biology => "biology",
            Subject::Chinese => "chinese",
            Subject::English => "english",
            Subject::History => "history",
            Subject::Geography => "geography",
            Subject::Politics => "politics",
            Subject::Computer => "computer",
            Subject::Other => "other",
        }
    }

    pub fn zh_name(self) -> &'static str {
        match self {
            Subject::Math => "数学",
            Subject::Physics => "物理",
            Subject::Chemistry => "化学",
            Subject::Biology => "生物",
            Subject::Chinese => "语文",
            Subject::English => "英语",
            Subject::History => "历史",
            Subject::Geography => "地理",
            Subject::Politics => "政治",
            Subject::Computer => "计算机",
            Subject::Other => "其他",
        }
    }

    pub fn en_name(self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Biology => "Biology",
            Subject::Chinese => "Chinese",
            Subject::English => "English",
            Subject::History => "History",
            Subject::Geography => "Geography",
            Subject::Politics => "Politics",
            Subject::Computer => "Computer",
            Subject::Other => "Other",
        }
    }

    /// 按语言获取展示名称（即发送给模型的科目字符串）
    pub fn display_name(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Zh => self.zh_name(),
            Locale::En => self.en_name(),
        }
    }

    /// 从键、中文名或英文名解析科目
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|subject| {
            subject.key().eq_ignore_ascii_case(s)
                || subject.zh_name() == s
                || subject.en_name().eq_ignore_ascii_case(s)
        })
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
