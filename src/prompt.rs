use std::fmt::Display;

use serde::Deserialize;

/// Caller-supplied banner brief for `/api/generate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BannerBrief {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub requirements: String,
}

/// Instruction asking the model for a JSON-only design spec.
///
/// Inputs are not validated; missing dimensions show up as `null` in the text.
pub fn build_generate_prompt(brief: &BannerBrief, font_family: &str) -> String {
    let width = or_null(brief.width);
    let height = or_null(brief.height);
    let purpose = or_null(brief.purpose.as_deref());
    let text_width = or_null(brief.width.map(|w| w - 80.0));

    let mut s = String::new();

    s.push_str("당신은 디지털 광고 배너 디자인 전문가입니다.\n");
    s.push_str("아래 조건에 맞는 배너 디자인 스펙을 JSON으로만 응답하세요. ");
    s.push_str("마크다운 코드 블록 없이 순수 JSON만 출력하세요.\n\n");

    s.push_str(&format!("- 사이즈: {width}x{height}px\n"));
    s.push_str(&format!("- 용도: {purpose}\n"));
    s.push_str(&format!("- 요구사항: {}\n\n", brief.requirements));

    s.push_str("다음 JSON 구조로 응답:\n");
    s.push_str(&format!(
        r#"{{
  "width": {width},
  "height": {height},
  "background": {{"r": 0.0, "g": 0.0, "b": 0.0}},
  "gradient": null,
  "shapes": [
    {{"name": "Button", "type": "RECTANGLE", "x": 0, "y": 0, "width": 200, "height": 50, "color": {{"r": 1, "g": 1, "b": 1}}, "opacity": 1, "corner_radius": 8}}
  ],
  "texts": [
    {{"name": "Headline", "text": "카피 텍스트", "x": 40, "y": 60, "width": {text_width}, "size": 48, "weight": 700, "font": "{font_family}", "align": "LEFT", "color": {{"r": 1, "g": 1, "b": 1}}}}
  ],
  "design_brief": "디자인 의도 설명"
}}
"#
    ));

    s.push_str("\ngradient를 사용할 경우 background는 null로 하고 gradient는 아래 형식:\n");
    s.push_str(
        r#"[{"position": 0, "color": {"r": 0.1, "g": 0.1, "b": 0.9, "a": 1}}, {"position": 1, "color": {"r": 0.5, "g": 0.0, "b": 0.8, "a": 1}}]"#,
    );
    s.push_str("\n\n");

    s.push_str("색상값은 0.0~1.0 범위의 float입니다.\n");
    s.push_str(&format!(
        "폰트는 반드시 \"{font_family}\"만 사용하세요. 다른 폰트는 허용되지 않습니다.\n"
    ));
    s.push_str("배너 용도와 요구사항에 맞게 레이아웃, 색상, 카피를 창의적으로 구성하세요.");

    s
}

/// Instruction for one stateless refinement turn. The caller resends the
/// banner context on every call.
pub fn build_chat_prompt(context: &str, message: &str) -> String {
    format!(
        "당신은 배너 디자인 수정을 도와주는 전문가입니다.\n\
         현재 배너 컨텍스트: {context}\n\
         사용자 수정 요청: {message}\n\
         \n\
         구체적인 수정 방법을 알려주세요."
    )
}

fn or_null<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}
