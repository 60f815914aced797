//! Prompt templates for the three generation calls.

use shared::domain::{Language, UserInfo, ZodiacSign};

pub fn horoscope_prompt(user: &UserInfo, sign: ZodiacSign, language: Language) -> String {
    let birth_date = user.birth_date_label();
    let sign_name = sign.name(language);
    match language {
        Language::English => format!(
            "I am {name}, born on {birth_date}. My sign is {sign_name}.\n\
             Please generate a detailed astrological forecast for me for today covering:\n\
             1. A general daily forecast.\n\
             2. Love and relationships.\n\
             3. Work and money.\n\
             4. Health.\n\
             5. A special piece of astrological advice.\n\
             Keep the tone mysterious, entertaining and professional.",
            name = user.name,
        ),
        Language::Arabic => format!(
            "أنا {name}، ولدت في {birth_date}. برجي هو {sign_name}.\n\
             من فضلك قم بتوليد توقعات فلكية مفصلة لي لهذا اليوم تشمل:\n\
             1. توقع يومي عام.\n\
             2. توقعات الحب والعلاقات.\n\
             3. توقعات العمل والمال.\n\
             4. توقعات الصحة.\n\
             5. نصيحة فلكية خاصة.\n\
             اجعل الأسلوب غامضاً وممتعاً واحترافياً.",
            name = user.name,
        ),
    }
}

pub fn natal_prompt(user: &UserInfo, sign: ZodiacSign, language: Language) -> String {
    let birth_date = user.birth_date_label();
    let birth_time = user
        .birth_time_label()
        .unwrap_or_else(|| language.unknown_placeholder().to_string());
    let birth_location = user
        .birth_location
        .as_deref()
        .unwrap_or(language.unknown_placeholder());
    let sign_name = sign.name(language);
    match language {
        Language::English => format!(
            "Personal natal chart analysis for {name}, born on {birth_date} at {birth_time} in {birth_location}.\n\
             The sun sign is {sign_name}.\n\
             Explain how the sun, the moon and the astrological houses shape their personality, career path and relationships.",
            name = user.name,
        ),
        Language::Arabic => format!(
            "تحليل الخريطة الفلكية الشخصية لـ {name} المولود في {birth_date} الساعة {birth_time} في {birth_location}.\n\
             البرج الشمسي هو {sign_name}.\n\
             اشرح تأثير الشمس والقمر والمنازل الفلكية على شخصيته ومساره المهني وعلاقاته.",
            name = user.name,
        ),
    }
}

/// Image prompts stay in English regardless of the UI language.
pub fn image_prompt(sign: ZodiacSign) -> String {
    format!(
        "A mystical and artistic cinematic portrait of the zodiac sign {sign}. \
         High fantasy style, cosmic background with nebulae and stars, ethereal lighting, \
         intricate details, glowing astrological symbols. The image should feel sacred and powerful."
    )
}
