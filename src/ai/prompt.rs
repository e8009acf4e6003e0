use serde::Deserialize;
use utoipa::ToSchema;

/// Characters of article content shown to the SEO prompt.
pub const SEO_EXCERPT_CHARS: usize = 1000;
/// Characters of generated content shown to the keyword prompt.
pub const KEYWORD_EXCERPT_CHARS: usize = 1500;
/// Longest image prompt forwarded to the image model.
pub const IMAGE_PROMPT_MAX_CHARS: usize = 800;

/// Knobs for article rewriting. Missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(default)]
pub struct GenerationOptions {
    pub language: String,
    pub tone: String,
    pub min_word_count: u32,
    pub keyword_density: f64,
    pub auto_headings: bool,
    pub use_lists: bool,
    pub add_faq: bool,
    pub add_conclusion: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            language: "english".to_string(),
            tone: "default".to_string(),
            min_word_count: 500,
            keyword_density: 2.5,
            auto_headings: true,
            use_lists: true,
            add_faq: true,
            add_conclusion: true,
        }
    }
}

fn tone_instruction(tone: &str) -> &'static str {
    match tone {
        "banarasi" => {
            "Write in a Banarasi dialect style, using casual expressions typical of Varanasi region."
        }
        "lucknow" => {
            "Write in a Lucknowi Nawabi style, using elegant and polite expressions typical of Lucknow."
        }
        "delhi" => "Write in a Delhi style, using direct and modern expressions typical of Delhi.",
        "indore" => {
            "Write in an Indori style, using casual expressions typical of Indore region."
        }
        _ => "Write in a professional, journalistic tone.",
    }
}

fn language_instruction(language: &str) -> &'static str {
    if language.eq_ignore_ascii_case("english") {
        "in English"
    } else {
        "in Hindi"
    }
}

/// First `max` characters of `text`, on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn article_prompt(content: &str, title: &str, options: &GenerationOptions) -> String {
    let mut prompt = format!(
        "You are an expert content writer tasked with rewriting a news article {language}. \n\
         Original title: \"{title}\"\n\
         \n\
         I'll give you the content from a news article, and your task is to:\n\
         \n\
         1. Rewrite the content completely to make it 100% unique and plagiarism-free.\n\
         2. Improve the title to be more engaging while keeping the main topic.\n\
         3. Write at least {min_words} words, which should be about 50 words more than the original content.\n\
         4. {tone}\n\
         5. Maintain a keyword density of approximately {density}% for important terms.\n",
        language = language_instruction(&options.language),
        min_words = options.min_word_count,
        tone = tone_instruction(&options.tone),
        density = options.keyword_density,
    );

    // numbering is fixed so the model sees the same item numbers either way
    if options.auto_headings {
        prompt.push_str("6. Add appropriate H2 and H3 headings to structure the content well.\n");
    }
    if options.use_lists {
        prompt.push_str(
            "7. Use bullet points or numbered lists where appropriate to improve readability.\n",
        );
    }
    if options.add_faq {
        prompt.push_str(
            "8. Include a FAQ section at the end with 3-5 relevant questions and answers.\n",
        );
    }
    if options.add_conclusion {
        prompt.push_str("9. Add a conclusion section at the end summarizing the main points.\n");
    }

    prompt.push_str("\nHere's the original content to rewrite:\n\n");
    prompt.push_str(content);
    prompt.push_str(
        "\n\nProvide the response in HTML format with proper heading tags, paragraph tags, and formatting.",
    );
    prompt
}

pub fn seo_prompt(content: &str, title: &str) -> String {
    format!(
        r#"As an SEO expert, analyze the following article and provide:

1. An SEO-optimized title (max 60 characters)
2. A list of 5-8 relevant tags for the article
3. 2-3 recommended categories for the article
4. A meta description (max 160 characters)

Article Title: {title}

Article Content:
{excerpt}...

Return your analysis as a JSON object with the following structure:
{{
  "seo_title": "Your optimized title here",
  "tags": ["tag1", "tag2", "tag3", "tag4", "tag5"],
  "categories": ["category1", "category2"],
  "meta_description": "Your meta description here"
}}
"#,
        excerpt = truncate_chars(content, SEO_EXCERPT_CHARS),
    )
}

pub fn keyword_prompt(content: &str) -> String {
    format!(
        "Extract 5-7 relevant tags/keywords from this text, return only a JSON array of strings:\n\n{}",
        truncate_chars(content, KEYWORD_EXCERPT_CHARS)
    )
}

fn style_instruction(style: &str) -> &'static str {
    match style {
        "realistic" => {
            "Create a photorealistic image with natural lighting and realistic details"
        }
        "digital-art" => "Create a digital art illustration with vibrant colors and clean lines",
        "cartoon" => {
            "Create a cartoon-style illustration with bold outlines and simplified shapes"
        }
        "3d-render" => "Create a 3D rendered image with depth, lighting, and realistic textures",
        "sketch" => "Create a hand-drawn sketch with pencil lines and shading",
        "watercolor" => "Create a watercolor painting with soft edges and translucent colors",
        "oil-painting" => "Create an oil painting with rich textures and visible brushstrokes",
        "minimalist" => {
            "Create a minimalist design with simple shapes and limited color palette"
        }
        _ => "Create a high-quality image",
    }
}

pub fn image_prompt(prompt: &str, style: &str) -> String {
    format!(
        "{} of {}. Make it suitable as a featured image for a news article or blog post.",
        style_instruction(style),
        truncate_chars(prompt, IMAGE_PROMPT_MAX_CHARS)
    )
}
