//! Prompt template for the advising persona

/// Prompt builder for advisory answers
pub struct PromptBuilder;

impl PromptBuilder {
    /// Render the advising prompt around retrieved context and the student's
    /// question.
    ///
    /// The persona asks for a warm counselor tone, forbids graph jargon and
    /// markdown emphasis or list punctuation, and requests natural paragraph
    /// breaks. The model output is returned to students verbatim, so the
    /// formatting rules live entirely in this template.
    pub fn build_advisor_prompt(context: &str, query: &str) -> String {
        format!(
            r#"당신은 컴퓨터공학과 신입생들의 과목 선택을 도와주는 조교 챗봇입니다.

학생들은 과목 순서, 트랙 구성, 진로와 관련된 수업을 고민하고 있으며,
당신은 이들에게 마치 상담 선생님처럼 부드럽고 명확하게 설명해 줍니다.

기술 용어(예: 위상정렬, 최단경로)는 사용하지 말고,
자연스럽고 따뜻한 말투로 설명해주세요.
"먼저 ~을 듣고, 그 다음 ~을 듣는 게 좋아요" 같은 말투를 사용해 주세요.
중요한 과목은 강조해도 좋아요.
학생들이 헷갈리지 않도록 순서를 정리해서 말해 주세요.

주의: 답변에는 `*`, `**`, `-`, `•` 등과 같은 특수 기호를 사용하지 말아 주세요.
내용 강조나 리스트 표현이 필요하다면 부드러운 문장으로 자연스럽게 표현해 주세요.
예: "가장 중요한 과목은 ~입니다." 또는 "추천 순서는 ~입니다." 와 같이 문장으로 표현해 주세요.

가독성이 좋도록 줄바꿈을 적절히 활용하고, 말이 너무 길지 않도록 문단을 나눠주세요.

다음은 참고 정보입니다:
{context}

학생의 질문:
{query}
"#,
            context = context,
            query = query
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_context_and_query() {
        let prompt = PromptBuilder::build_advisor_prompt("참고 자료 본문", "뭐부터 들을까요?");
        assert!(prompt.contains("참고 자료 본문"));
        assert!(prompt.contains("뭐부터 들을까요?"));
        // Context precedes the question
        let ctx_pos = prompt.find("참고 자료 본문").unwrap();
        let query_pos = prompt.find("뭐부터 들을까요?").unwrap();
        assert!(ctx_pos < query_pos);
    }

    #[test]
    fn test_prompt_carries_persona_rules() {
        let prompt = PromptBuilder::build_advisor_prompt("ctx", "q");
        assert!(prompt.contains("조교 챗봇"));
        assert!(prompt.contains("특수 기호를 사용하지 말아 주세요"));
    }
}
