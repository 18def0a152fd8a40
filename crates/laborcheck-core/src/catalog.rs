//! The built-in labor-inspection self-diagnosis catalog.
//!
//! Seven weighted categories and 53 questions covering the items a labor
//! inspector typically checks. This is compiled-in configuration; use
//! [`Schema::builtin`](crate::schema::Schema::builtin) to get a validated copy.

use crate::model::{AnswerValue, Category, Question};

use crate::model::AnswerValue::{NeedsVerification, No, NotApplicable, Partial, Unknown, Yes};

const BASIC: &[AnswerValue] = &[Yes, No, Partial, Unknown];
const WITH_NA: &[AnswerValue] = &[Yes, No, Partial, Unknown, NotApplicable];
const VERIFY: &[AnswerValue] = &[Yes, No, NeedsVerification, Unknown];
const VERIFY_NA: &[AnswerValue] = &[Yes, No, NeedsVerification, NotApplicable];

const CATEGORIES: &[(&str, f64)] = &[
    ("근로계약", 15.0),
    ("임금", 20.0),
    ("근로시간·휴게", 15.0),
    ("휴일·휴가", 15.0),
    ("퇴직·해고", 10.0),
    ("취업규칙·서류관리", 10.0),
    ("직장 내 괴롭힘·성희롱·안전", 15.0),
];

const QUESTIONS: &[(usize, &[AnswerValue], &str)] = &[
    // 근로계약
    (0, BASIC, "모든 근로자와 서면으로 근로계약을 체결하고 있습니까?"),
    (0, BASIC, "근로계약서에 임금의 구성항목·계산방법·지급방법이 명시되어 있습니까?"),
    (0, BASIC, "근로계약서에 소정근로시간, 휴일, 연차유급휴가가 명시되어 있습니까?"),
    (0, BASIC, "체결한 근로계약서를 근로자에게 교부하고 있습니까?"),
    (0, WITH_NA, "기간제 근로자와 근로계약기간을 명시하여 계약하고 있습니까?"),
    (0, WITH_NA, "단시간 근로자의 근로일 및 근로일별 근로시간을 계약서에 명시하고 있습니까?"),
    (0, WITH_NA, "18세 미만 근로자의 가족관계증명서와 친권자 동의서를 비치하고 있습니까?"),
    (0, VERIFY, "근로계약 내용이 변경되면 변경 사항을 서면으로 다시 교부하고 있습니까?"),
    // 임금
    (1, BASIC, "최저임금 이상의 임금을 지급하고 있습니까?"),
    (1, BASIC, "임금을 매월 1회 이상 정해진 날짜에 지급하고 있습니까?"),
    (1, BASIC, "임금을 통화로 직접 근로자에게 전액 지급하고 있습니까?"),
    (1, BASIC, "임금명세서를 작성하여 교부하고 있습니까?"),
    (1, WITH_NA, "연장·야간·휴일근로에 대해 통상임금의 50% 이상을 가산하여 지급하고 있습니까?"),
    (1, VERIFY, "통상임금 산정 시 정기적·일률적으로 지급되는 수당을 포함하고 있습니까?"),
    (1, BASIC, "퇴직 시 14일 이내에 임금 등 모든 금품을 청산하고 있습니까?"),
    (1, BASIC, "법령이나 단체협약에 근거 없는 임금 공제를 하지 않고 있습니까?"),
    (1, VERIFY_NA, "포괄임금제 운영 시 실제 근로시간에 따른 수당이 정액 수당을 넘지 않는지 확인하고 있습니까?"),
    // 근로시간·휴게
    (2, BASIC, "1주 소정근로시간이 40시간을 초과하지 않습니까?"),
    (2, BASIC, "연장근로가 1주 12시간을 초과하지 않습니까?"),
    (2, BASIC, "연장근로에 대해 근로자와 합의하고 있습니까?"),
    (2, BASIC, "4시간 근로 시 30분, 8시간 근로 시 1시간 이상의 휴게시간을 근로시간 도중에 부여하고 있습니까?"),
    (2, BASIC, "출퇴근 기록 등으로 근로시간을 객관적으로 관리하고 있습니까?"),
    (2, VERIFY_NA, "탄력적·선택적 근로시간제 운영 시 근로자대표와 서면 합의를 하였습니까?"),
    (2, WITH_NA, "임산부 및 18세 미만 근로자의 야간·휴일근로 시 인가 또는 동의를 받고 있습니까?"),
    (2, WITH_NA, "임신 중인 근로자의 근로시간 단축 신청을 허용하고 있습니까?"),
    // 휴일·휴가
    (3, BASIC, "1주 소정근로일을 개근한 근로자에게 주 1회 이상 유급휴일을 부여하고 있습니까?"),
    (3, BASIC, "관공서 공휴일을 유급휴일로 보장하고 있습니까?"),
    (3, BASIC, "연차유급휴가를 법정 일수 이상 부여하고 있습니까?"),
    (3, BASIC, "1년 미만 근로자에게 1개월 개근 시 1일의 유급휴가를 부여하고 있습니까?"),
    (3, VERIFY, "연차휴가 사용촉진 절차를 서면으로 이행하고 있습니까?"),
    (3, BASIC, "사용하지 않은 연차휴가에 대해 수당을 지급하고 있습니까?"),
    (3, WITH_NA, "출산전후휴가 90일(다태아 120일)을 부여하고 있습니까?"),
    (3, WITH_NA, "육아휴직 신청을 허용하고 이를 이유로 불리한 처우를 하지 않습니까?"),
    // 퇴직·해고
    (4, BASIC, "1년 이상 근무한 근로자에게 퇴직금 또는 퇴직연금을 지급하고 있습니까?"),
    (4, BASIC, "퇴직금을 퇴직일로부터 14일 이내에 지급하고 있습니까?"),
    (4, BASIC, "퇴직급여제도(퇴직금 또는 퇴직연금)를 설정하고 있습니까?"),
    (4, WITH_NA, "해고 시 30일 전에 예고하거나 30일분 이상의 통상임금을 지급하고 있습니까?"),
    (4, WITH_NA, "해고 사유와 시기를 서면으로 통지하고 있습니까?"),
    (4, VERIFY, "정당한 이유 없는 해고·징계를 막는 절차를 갖추고 있습니까?"),
    (4, VERIFY_NA, "퇴직금 중간정산을 법정 사유에 한해서만 실시하고 있습니까?"),
    // 취업규칙·서류관리
    (5, WITH_NA, "상시 10인 이상 사업장인 경우 취업규칙을 작성하여 신고하였습니까?"),
    (5, WITH_NA, "취업규칙을 근로자가 자유롭게 열람할 수 있는 곳에 게시·비치하고 있습니까?"),
    (5, VERIFY_NA, "취업규칙을 불리하게 변경할 때 근로자 과반수의 동의를 받았습니까?"),
    (5, BASIC, "근로자명부를 작성하여 비치하고 있습니까?"),
    (5, BASIC, "임금대장을 작성하고 3년간 보존하고 있습니까?"),
    (5, BASIC, "근로기준법 주요 내용과 취업규칙을 근로자에게 알리고 있습니까?"),
    // 직장 내 괴롭힘·성희롱·안전
    (6, BASIC, "연 1회 이상 직장 내 성희롱 예방교육을 실시하고 있습니까?"),
    (6, VERIFY, "직장 내 괴롭힘 예방 및 발생 시 조치사항을 취업규칙에 규정하고 있습니까?"),
    (6, BASIC, "직장 내 괴롭힘 신고가 접수되면 지체 없이 조사하고 피해자 보호 조치를 하고 있습니까?"),
    (6, BASIC, "신고자나 피해 근로자에게 불리한 처우를 하지 않습니까?"),
    (6, BASIC, "산업안전보건교육을 정기적으로 실시하고 있습니까?"),
    (6, WITH_NA, "고객응대 근로자의 건강장해 예방조치를 하고 있습니까?"),
    (6, BASIC, "연 1회 이상 장애인 인식개선 교육을 실시하고 있습니까?"),
];

/// The built-in categories, in id order.
pub fn categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .enumerate()
        .map(|(id, &(name, weight))| Category {
            id,
            name: name.to_string(),
            weight,
        })
        .collect()
}

/// The built-in questions, in global order.
pub fn questions() -> Vec<Question> {
    QUESTIONS
        .iter()
        .enumerate()
        .map(|(index, &(category_id, options, text))| Question {
            index,
            category_id,
            text: text.to_string(),
            options: options.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sizes() {
        assert_eq!(categories().len(), 7);
        assert_eq!(questions().len(), 53);
    }

    #[test]
    fn every_question_can_be_answered_yes_and_no() {
        for q in questions() {
            assert!(q.allows(AnswerValue::Yes), "question {}", q.index);
            assert!(q.allows(AnswerValue::No), "question {}", q.index);
        }
    }
}
