//! 模拟解答
//!
//! 远端调用失败时的降级内容，只依赖科目和语言，输出确定

use crate::models::{Locale, SolveResult};

pub fn mock_solve_result(subject: &str, locale: Locale) -> SolveResult {
    match locale {
        Locale::En => SolveResult {
            thinking: format!(
                "Let me analyze this {subject} problem:\n\n\
                 1. First, I need to understand the requirements\n\
                 2. Identify key information and known conditions\n\
                 3. Determine the problem-solving approach\n\
                 4. Step-by-step derivation and calculation"
            ),
            solution: format!(
                "Solution:\n\n\
                 Based on the problem analysis, we can use the following method:\n\n\
                 Step 1: List known conditions\n\
                 - Condition A: ...\n\
                 - Condition B: ...\n\n\
                 Step 2: Apply relevant formulas/theorems\n\
                 Using basic principles in {subject}...\n\n\
                 Step 3: Calculation process\n\
                 Detailed calculation steps...\n\n\
                 Step 4: Final answer\n\
                 The answer is: ...\n\n\
                 Note: This is a mock answer. Please configure the real AI API for actual use."
            ),
        },
        Locale::Zh => SolveResult {
            thinking: format!(
                "让我分析一下这道{subject}题目：\n\n\
                 1. 首先，我需要理解题目的要求\n\
                 2. 识别题目中的关键信息和已知条件\n\
                 3. 确定解题思路和方法\n\
                 4. 逐步推导和计算"
            ),
            solution: format!(
                "解答：\n\n\
                 根据题目分析，我们可以采用以下方法：\n\n\
                 步骤1：列出已知条件\n\
                 - 条件A：...\n\
                 - 条件B：...\n\n\
                 步骤2：应用相关公式/定理\n\
                 使用{subject}中的基本原理...\n\n\
                 步骤3：计算过程\n\
                 详细计算步骤...\n\n\
                 步骤4：得出答案\n\
                 最终答案为：...\n\n\
                 注意：这是模拟答案，实际使用时需要配置真实的AI API。"
            ),
        },
    }
}
