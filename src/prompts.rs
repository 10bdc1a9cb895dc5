//! Instruction templates sent to the content model.

pub fn fact(context: &str, topic: &str, wonder: &str, callback: &str) -> String {
    format!(
        r#"{context}

TASK: Share a genuinely surprising fact about {topic}.
TYPE OF WONDER: {wonder}
{callback}

Requirements:
- Lead with the surprise, the thing that breaks intuition, that seems wrong but isn't
- Include a vivid, unexpected analogy ("It's like..." or "Imagine...")
- Connect it to something people encounter in daily life when possible
- Use concrete scale comparisons for large/small numbers (not "billions of miles" but "light takes X minutes")
- End with a question, mini-challenge, or "next time you see X, notice..."
- 3-5 sentences total
- Do NOT repeat or closely echo anything from <recent_posts>
- No preamble, start directly with the surprising content
- Close with one relevant emoji"#
    )
}

pub fn callback(days_ago: i64, summary: &str) -> String {
    format!(
        r#"
CALLBACK OPPORTUNITY: About {days_ago} days ago,
you shared this: "{summary}"
Consider briefly connecting today's fact to this earlier one if there's a natural link.
If no natural link, ignore this and just share a fresh fact."#
    )
}

pub fn custom_fact(topic: &str) -> String {
    format!(
        r#"Share a genuinely surprising fact about {topic}.

Requirements:
- Lead with the surprise, the thing that breaks intuition
- Include a vivid analogy
- Connect to everyday experience if possible
- End with a question or "notice this next time..."
- 3-5 sentences
- No preamble
- Close with one emoji"#
    )
}

pub fn what_if(context: &str, topic: &str) -> String {
    format!(
        r#"{context}

TASK: Ask an absurd hypothetical question and answer it with real physics or math.

Think like Randall Munroe's "What If?": silly premise, rigorous analysis.

Examples of good premises:
- "What if you stirred your coffee at the speed of sound?"
- "What if Earth's gravity doubled for just one second?"
- "What if you could walk on the surface of the sun wearing a perfect reflective suit?"
- "What if every human jumped at the same time?"
- "What if you tried to build a bridge to the moon?"

Related topic to draw from (but get creative): {topic}

Requirements:
- Pose the absurd question, then walk through what would actually happen
- Use specific numbers and consequences, be concrete
- The physics/math should be real even though the premise is silly
- Maintain a playful but genuinely curious tone
- 4-6 sentences total
- Do NOT repeat premises from <recent_posts>
- No preamble, start with the hypothetical question directly
- Close with one relevant emoji"#
    )
}

pub fn puzzle(context: &str, topic: &str) -> String {
    format!(
        r#"{context}

TASK: Pose an intriguing puzzle or paradox from {topic}.

Requirements:
- The puzzle should be accessible but not trivial
- It should have a real, satisfying answer (you'll provide it separately)
- Classic brain-teasers and famous paradoxes are fine if not recently used
- State the puzzle clearly
- Do NOT give the answer, end with "Think about it..." or similar
- 2-4 sentences for the puzzle
- Do NOT repeat puzzles from <recent_posts>
- No preamble, start with the puzzle directly
- Close with 🤔

After the puzzle, provide the answer in a SEPARATE section marked ANSWER: that will be posted tomorrow."#
    )
}

pub fn connections(digest: &str) -> String {
    format!(
        r#"This week's posts:
{digest}

TASK: Write a brief "connections" post that ties together themes from this week.

Requirements:
- Find a thread or theme that connects 2-3 of these posts
- Zoom out to show where these fit in the bigger picture of physics/math/the universe
- Optionally: connect to the human story of discovery
- Evoke a sense of wonder at how things connect
- 3-5 sentences
- Don't just list what was covered, find the hidden links
- Close with one relevant emoji (suggest: 🌌 or 🔗 or 🧵)"#
    )
}

pub fn summary(content: &str) -> String {
    format!(
        "Summarize this in 1 sentence (under 100 words), focusing on the core concept or question:\n\n{content}"
    )
}
