//! Prompt contracts for the document generator.
//!
//! The orchestrator owns everything prompt-shaped: system instructions,
//! user message assembly, fence stripping, and title cleanup. Generation
//! adapters only move text.

/// Token ceiling for full document generation.
pub const DOCUMENT_MAX_TOKENS: u32 = 8192;

/// Token ceiling for title generation.
pub const TITLE_MAX_TOKENS: u32 = 50;

/// Maximum character length for a derived title.
pub const TITLE_MAX_LEN: usize = 40;

const BASE_SYSTEM_PROMPT: &str = r#"You are a friendly coding assistant for kids! A 7-year-old child is asking you to create something fun.

Your task: Generate a SINGLE, COMPLETE HTML file that includes ALL CSS (in a <style> tag) and ALL JavaScript (in a <script> tag).

IMPORTANT RULES:
1. Create fun, colorful, interactive web pages that kids will love
2. Use bright colors, fun animations, and playful elements
3. Make it simple but engaging - kids love:
   - Games (simple ones like click games, matching games)
   - Animations (bouncing, spinning, color changing)
   - Interactive elements (buttons that do fun things)
   - Cute characters and emojis
4. The code must be COMPLETE and WORKING
5. Include helpful comments in the code
6. Use large fonts and buttons (easy for kids to click)
7. Make it responsive and work well on different screens
8. Return ONLY the HTML code, no explanations before or after
9. Start with <!DOCTYPE html> and end with </html>

FOR 3D GAMES AND 3D CONTENT:
If the kid asks for anything 3D (3D game, 3D world, 3D objects, 3D characters, etc.), use Three.js via CDN:
- Include Three.js from CDN: <script src="https://cdnjs.cloudflare.com/ajax/libs/three.js/r128/three.min.js"></script>
- Create fun 3D scenes with colorful objects, simple controls
- Use OrbitControls for easy camera movement (kid can drag to rotate):
  <script src="https://cdn.jsdelivr.net/npm/three@0.128.0/examples/js/controls/OrbitControls.js"></script>
- Make 3D objects bright and colorful (use MeshBasicMaterial or MeshPhongMaterial with fun colors)
- Add simple animations (rotating, bouncing, floating objects)
- Include basic lighting (ambient + directional light)
- Keep controls simple: arrow keys, mouse click, or drag to interact
- Add fun sound effects using Web Audio API if appropriate

ALLOWED CDN LIBRARIES (use only when needed):
- Three.js for 3D: https://cdnjs.cloudflare.com/ajax/libs/three.js/r128/three.min.js
- GSAP for advanced animations: https://cdnjs.cloudflare.com/ajax/libs/gsap/3.12.2/gsap.min.js
- Howler.js for sounds: https://cdnjs.cloudflare.com/ajax/libs/howler/2.2.3/howler.min.js

For 2D content, keep everything self-contained with no external dependencies.

Remember: This is for a 7-year-old, so make it FUN, COLORFUL, and MAGICAL! ✨"#;

const REVISION_ADDENDUM: &str = r"IMPORTANT - MODIFYING EXISTING CODE:
The kid already has a project they've been working on. They want to MODIFY or ADD to their existing creation.
- Keep all the existing features that work well
- Only change/add what the kid is asking for
- Don't remove existing functionality unless specifically asked
- Preserve the existing style and theme
- Make sure the changes integrate smoothly with the existing code
- If the kid asks for something that conflicts with existing code, update the existing code to accommodate the new feature";

/// System instructions for a generation call.
///
/// Revisions carry an addendum telling the model to preserve the existing
/// document's working behaviour.
pub fn document_system_prompt(revising: bool) -> String {
    if revising {
        format!("{BASE_SYSTEM_PROMPT}\n\n{REVISION_ADDENDUM}")
    } else {
        BASE_SYSTEM_PROMPT.to_owned()
    }
}

/// User message for a generation call.
///
/// A prior document is embedded fenced so the model revises instead of
/// starting over. When the instruction was translated, `reply_language`
/// asks for on-page text in the creator's own language.
pub fn document_user_message(
    instruction: &str,
    prior_document: Option<&str>,
    reply_language: Option<&str>,
) -> String {
    let mut message = match prior_document {
        Some(existing) => format!(
            "Here is my current project code:\n\n```html\n{existing}\n```\n\n\
             Now please modify it to: {instruction}\n\n\
             Return the COMPLETE updated HTML file with all my existing features PLUS the new changes."
        ),
        None => format!("Create this for me: {instruction}"),
    };

    if let Some(language) = reply_language {
        message.push_str(&format!(
            "\n\nThe kid originally wrote their request in {language}. \
             Any words shown on the page should be in {language}."
        ));
    }

    message
}

/// User message asking for a short title for a first creation.
pub fn title_user_message(instruction: &str) -> String {
    format!(
        "Generate a short, catchy game title (2-4 words max) for this creation request: \"{instruction}\"\n\n\
         Rules:\n\
         - Keep it very short (2-4 words)\n\
         - Make it fun and kid-friendly\n\
         - No quotes or punctuation\n\
         - Just the title, nothing else\n\n\
         Examples:\n\
         - \"make a bouncing ball game\" → \"Bouncy Ball Fun\"\n\
         - \"create fireworks when I click\" → \"Click Fireworks\"\n\
         - \"draw a cat that moves\" → \"Dancing Cat\"\n\
         - \"make a space shooter\" → \"Space Blaster\"\n\n\
         Title:"
    )
}

/// Remove markdown code fences the model sometimes wraps documents in.
pub fn strip_code_fences(raw: &str) -> String {
    let stripped = if raw.contains("```html") {
        raw.replace("```html\n", "").replace("```html", "")
    } else {
        raw.to_owned()
    };
    stripped
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_owned()
}

/// Clean a generated title: trim, drop surrounding quotes, cap length.
///
/// Returns `None` when nothing usable remains; callers keep the artifact's
/// existing name in that case.
pub fn tidy_title(raw: &str) -> Option<String> {
    let mut title = raw.trim();
    title = title
        .strip_prefix(['"', '\''])
        .unwrap_or(title)
        .strip_suffix(['"', '\''])
        .unwrap_or(title);
    let title = title.trim();

    if title.is_empty() {
        return None;
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Some(title.chars().take(TITLE_MAX_LEN).collect());
    }
    Some(title.to_owned())
}
