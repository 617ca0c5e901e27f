//! 界面文案
//!
//! 中英文两套静态键值表，编译期生成

use phf::phf_map;

use super::Locale;

static ZH: phf::Map<&'static str, &'static str> = phf_map! {
    "app.title" => "AI作业求解器",
    "app.subtitle" => "智能识别，精准解答",
    "subject.label" => "选择科目",
    "upload.text" => "点击或拖拽图片到这里上传",
    "upload.hint" => "支持批量上传多张图片",
    "images.title" => "已上传图片",
    "batch.solve" => "批量求解",
    "batch.solving" => "批量求解中...",
    "solve" => "求解",
    "solving" => "求解中",
    "solved" => "已解答",
    "panel.title" => "AI解答面板",
    "panel.empty" => "选择一张图片开始求解",
    "panel.thinking" => "思考过程",
    "panel.solution" => "解答",
    "panel.download" => "下载",
    "panel.analyzing" => "AI正在分析题目...",
    "panel.start" => "点击\"求解\"按钮开始分析",
    "error.solve_failed" => "求解失败，请检查网络连接和API配置",
    "subjects.math" => "数学",
    "subjects.physics" => "物理",
    "subjects.chemistry" => "化学",
    "subjects.biology" => "生物",
    "subjects.chinese" => "语文",
    "subjects.english" => "英语",
    "subjects.history" => "历史",
    "subjects.geography" => "地理",
    "subjects.politics" => "政治",
    "subjects.computer" => "计算机",
    "subjects.other" => "其他",
};

static EN: phf::Map<&'static str, &'static str> = phf_map! {
    "app.title" => "AI Homework Solver",
    "app.subtitle" => "Smart Recognition, Accurate Solutions",
    "subject.label" => "Select Subject",
    "upload.text" => "Click or drag images here to upload",
    "upload.hint" => "Supports batch upload of multiple images",
    "images.title" => "Uploaded Images",
    "batch.solve" => "Batch Solve",
    "batch.solving" => "Solving...",
    "solve" => "Solve",
    "solving" => "Solving",
    "solved" => "Solved",
    "panel.title" => "AI Solution Panel",
    "panel.empty" => "Select an image to start solving",
    "panel.thinking" => "Thinking Process",
    "panel.solution" => "Solution",
    "panel.download" => "Download",
    "panel.analyzing" => "AI is analyzing the problem...",
    "panel.start" => "Click \"Solve\" button to start analysis",
    "error.solve_failed" => "Solving failed, please check network connection and API configuration",
    "subjects.math" => "Math",
    "subjects.physics" => "Physics",
    "subjects.chemistry" => "Chemistry",
    "subjects.biology" => "Biology",
    "subjects.chinese" => "Chinese",
    "subjects.english" => "English",
    "subjects.history" => "History",
    "subjects.geography" => "Geography",
    "subjects.politics" => "Politics",
    "subjects.computer" => "Computer",
    "subjects.other" => "Other",
};

/// 查询文案，缺失时原样返回键
pub fn translate<'a>(locale: Locale, key: &'a str) -> &'a str {
    let table = match locale {
        Locale::Zh => &ZH,
        Locale::En => &EN,
    };
    table.get(key).copied().unwrap_or(key)
}
