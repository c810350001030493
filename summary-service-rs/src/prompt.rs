//! Prompt templates for testimonial summaries
//!
//! The survey text groups the first seven answers under fixed section
//! headers. The same text is produced for the HTTP summarize action and for
//! the legacy sheet trigger; only the handling of blank answers differs.

use serde_json::Value;

/// Number of answers that feed the summary
pub const SUMMARY_ANSWER_COUNT: usize = 7;

/// Rendered in place of a blank answer on the HTTP path
pub const UNANSWERED: &str = "（未回答）";

/// System instruction for the marketing editor role
pub const SYSTEM_PROMPT: &str = "あなたは医療機関向けサービスのマーケティング担当者です。
お客様から頂いた生の声を、ホームページに掲載する「お客様の声」として編集する役割です。

【編集の方針】
・お客様の言葉をできるだけ活かす
・過度に称賛的にならず、自然な表現で
・具体的なエピソードや理由を含める
・読み手（他の医療機関）が共感できる内容に
・押しつけがましくない、自然な推薦文に

【NGな表現】
・「非常に素晴らしい」など大げさな表現
・「心からおすすめします」など過度な推薦
・定型的すぎる文章
・営業的な文言

【目指す雰囲気】
実際の利用者が、同業者に「ここ良かったよ」と
カジュアルに話しているような自然さ";

const USER_PROMPT_PREAMBLE: &str = "以下のアンケート回答を、ホームページの「お客様の声」として掲載できる形に編集してください。

【編集のポイント】
・導入を検討したきっかけ
・なぜグローアップを選んだのか
・実際に使ってみてどうだったか
・どんな医療機関におすすめか

文字数：180〜220文字程度
※無理に文字数を合わせる必要はありません。自然な文章を優先してください。

---アンケート回答---
";

/// Answers posted with the summarize action
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryAnswers {
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
    pub q4: Option<String>,
    pub q5: Option<String>,
    pub q6: Option<String>,
    pub q7: Option<String>,
}

impl SummaryAnswers {
    /// Read `q1`..`q7` from a JSON object, `None` if `answers` is not an object
    ///
    /// Strings are kept as sent. Null, `false`, `0` and absent keys are blank;
    /// any other value is kept as its JSON text. Unknown keys are ignored.
    pub fn from_json(answers: &Value) -> Option<Self> {
        let fields = answers.as_object()?;
        let slot = |key: &str| match fields.get(key) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        Some(Self {
            q1: slot("q1"),
            q2: slot("q2"),
            q3: slot("q3"),
            q4: slot("q4"),
            q5: slot("q5"),
            q6: slot("q6"),
            q7: slot("q7"),
        })
    }

    /// Answers in slot order with blanks replaced by the placeholder
    pub fn rendered(&self) -> [&str; SUMMARY_ANSWER_COUNT] {
        fn slot(answer: &Option<String>) -> &str {
            match answer.as_deref() {
                Some(text) if !text.is_empty() => text,
                _ => UNANSWERED,
            }
        }
        [
            slot(&self.q1),
            slot(&self.q2),
            slot(&self.q3),
            slot(&self.q4),
            slot(&self.q5),
            slot(&self.q6),
            slot(&self.q7),
        ]
    }

    /// True if at least one slot carries text
    pub fn has_any_answer(&self) -> bool {
        [&self.q1, &self.q2, &self.q3, &self.q4, &self.q5, &self.q6, &self.q7]
            .iter()
            .any(|answer| answer.as_deref().is_some_and(|text| !text.trim().is_empty()))
    }

    pub fn survey_text(&self) -> String {
        build_survey_text(self.rendered())
    }
}

/// Lay the seven answers out under their section headers
pub fn build_survey_text(answers: [&str; SUMMARY_ANSWER_COUNT]) -> String {
    let [q1, q2, q3, q4, q5, q6, q7] = answers;
    let text = format!(
        "【再生医療導入の経緯】
導入のきっかけ: {q1}
サポート依頼の理由: {q2}
他社との比較: {q3}

【選定理由】
決め手: {q4}

【サービス評価】
担当者の対応: {q5}
サービス満足度: {q6}

【推薦コメント】
{q7}"
    );
    text.trim().to_string()
}

/// Wrap survey text in the editing instructions
pub fn build_user_prompt(survey_text: &str) -> String {
    format!("{}{}", USER_PROMPT_PREAMBLE, survey_text)
}
