//! UI routes - HTML pages for the archive web interface
//!
//! Vanilla HTML/CSS/JS, no frameworks. Pages call the JSON API with
//! `fetch` and render a single success or failure message per submission.

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::AppState;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_page))
        .route("/browse", get(browse_page))
        .route("/timeline", get(timeline_page))
        .route("/upload", get(upload_page))
        .route("/write", get(write_page))
        .route("/record", get(record_page))
}

/// Shared page chrome: header, navigation, styles
fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Heirloom Archive</title>
    <style>
        body {{
            font-family: Georgia, 'Times New Roman', serif;
            max-width: 860px;
            margin: 0 auto;
            padding: 20px;
            line-height: 1.6;
            color: #332f2b;
        }}
        header {{ text-align: center; border-bottom: 2px solid #8a6d3b; padding-bottom: 10px; }}
        header p {{ color: #777; margin-top: 0; }}
        nav ul {{ list-style: none; display: flex; gap: 16px; justify-content: center; padding: 0; }}
        nav a {{ color: #8a6d3b; text-decoration: none; }}
        nav a:hover {{ text-decoration: underline; }}
        h1 {{ margin-bottom: 4px; }}
        .form-group {{ margin-bottom: 14px; }}
        .form-group label {{ display: block; font-weight: bold; margin-bottom: 4px; }}
        .form-group input, .form-group select, .form-group textarea {{
            width: 100%; padding: 8px; border: 1px solid #ccc; border-radius: 4px;
            font-family: inherit; box-sizing: border-box;
        }}
        .checkbox-label {{ font-weight: normal; }}
        button {{
            padding: 10px 20px; background: #8a6d3b; color: white;
            border: none; border-radius: 4px; cursor: pointer; font-size: 1rem;
        }}
        button:disabled {{ background: #bbb; }}
        .message {{ margin-top: 12px; padding: 10px; border-radius: 4px; }}
        .message.success {{ background: #e7f4e4; color: #2d5a27; }}
        .message.error {{ background: #f8e1e1; color: #8a2727; }}
        .item-card {{ border: 1px solid #ddd; border-radius: 6px; padding: 14px; margin-bottom: 12px; }}
        .item-card h3 {{ margin: 0 0 6px 0; }}
        .item-meta {{ color: #777; font-size: 0.85rem; }}
        .year-heading {{ border-bottom: 1px solid #ddd; color: #8a6d3b; }}
    </style>
</head>
<body>
    <header>
        <h1>Heirloom Family Archive</h1>
        <p>Letters, photos, recordings, and memories across the generations</p>
    </header>
    <nav>
        <ul>
            <li><a href="/">Home</a></li>
            <li><a href="/browse">Browse</a></li>
            <li><a href="/timeline">Timeline</a></li>
            <li><a href="/upload">Upload</a></li>
            <li><a href="/write">Write</a></li>
            <li><a href="/record">Record</a></li>
        </ul>
    </nav>
    <main>
{body}
    </main>
</body>
</html>"#
    ))
}

/// Root page
async fn home_page() -> impl IntoResponse {
    layout(
        "Home",
        r#"
        <h2>Welcome</h2>
        <p>This archive collects the family's story: letters and diaries,
        photographs, recorded voices, and written memories. Everything
        contributed here is kept for the generations that follow.</p>

        <h3>Contribute</h3>
        <ul>
            <li><a href="/upload">Upload</a> a photo, letter, or document</li>
            <li><a href="/write">Write</a> down a memory or story</li>
            <li><a href="/record">Record</a> your voice telling it</li>
        </ul>

        <h3>Explore</h3>
        <ul>
            <li><a href="/browse">Browse</a> the collection by type</li>
            <li><a href="/timeline">Timeline</a> of dated items</li>
        </ul>
"#,
    )
}

/// Browse page with category filter
async fn browse_page() -> impl IntoResponse {
    layout(
        "Browse",
        r##"
        <h2>Archive Browser</h2>
        <nav>
            <ul>
                <li><a href="#" data-category="all">All</a></li>
                <li><a href="#" data-category="letters">Letters</a></li>
                <li><a href="#" data-category="diaries">Diaries</a></li>
                <li><a href="#" data-category="photos">Photos</a></li>
                <li><a href="#" data-category="recordings">Recordings</a></li>
                <li><a href="#" data-category="stories">Stories</a></li>
            </ul>
        </nav>
        <p id="count"></p>
        <div id="items"></div>
        <script>
        async function load(category) {
            const res = await fetch('/api/items?category=' + encodeURIComponent(category));
            const data = await res.json();
            document.getElementById('count').textContent = data.count + ' items found';
            const container = document.getElementById('items');
            container.innerHTML = '';
            if (data.items.length === 0) {
                container.textContent = 'No items found in this category yet.';
                return;
            }
            for (const item of data.items) {
                const card = document.createElement('div');
                card.className = 'item-card';
                const heading = document.createElement('h3');
                heading.textContent = item.title;
                card.appendChild(heading);
                const meta = document.createElement('div');
                meta.className = 'item-meta';
                meta.textContent = item.category
                    + (item.occurred_on ? ' | ' + item.occurred_on : ' | Date unknown')
                    + (item.contributor_name ? ' | By: ' + item.contributor_name : '');
                card.appendChild(meta);
                const text = document.createElement('p');
                text.textContent = item.description || (item.body_text || '').substring(0, 150);
                card.appendChild(text);
                if (item.asset_kind === 'image') {
                    const img = document.createElement('img');
                    img.src = item.asset_url;
                    img.style.maxWidth = '100%';
                    card.appendChild(img);
                } else if (item.asset_kind === 'audio') {
                    const audio = document.createElement('audio');
                    audio.controls = true;
                    audio.src = item.asset_url;
                    card.appendChild(audio);
                } else if (item.asset_url) {
                    const link = document.createElement('a');
                    link.href = item.asset_url;
                    link.textContent = 'View attachment';
                    card.appendChild(link);
                }
                container.appendChild(card);
            }
        }
        document.querySelectorAll('[data-category]').forEach(a => {
            a.addEventListener('click', e => {
                e.preventDefault();
                load(a.dataset.category);
            });
        });
        load(new URLSearchParams(window.location.search).get('category') || 'all');
        </script>
"##,
    )
}

/// Timeline page
async fn timeline_page() -> impl IntoResponse {
    layout(
        "Timeline",
        r#"
        <h2>Family Timeline</h2>
        <p>Dated items from the archive, earliest first.</p>
        <div id="timeline"></div>
        <script>
        async function load() {
            const res = await fetch('/api/timeline');
            const years = await res.json();
            const container = document.getElementById('timeline');
            if (years.length === 0) {
                container.textContent = 'No dated items yet.';
                return;
            }
            for (const group of years) {
                const heading = document.createElement('h3');
                heading.className = 'year-heading';
                heading.textContent = group.year;
                container.appendChild(heading);
                for (const item of group.items) {
                    const card = document.createElement('div');
                    card.className = 'item-card';
                    const title = document.createElement('strong');
                    title.textContent = item.title;
                    card.appendChild(title);
                    const meta = document.createElement('div');
                    meta.className = 'item-meta';
                    meta.textContent = item.occurred_on
                        + (item.date_is_approximate ? ' (approximate)' : '')
                        + ' | ' + item.category;
                    card.appendChild(meta);
                    container.appendChild(card);
                }
            }
        }
        load();
        </script>
"#,
    )
}

/// Upload form page
async fn upload_page() -> impl IntoResponse {
    layout(
        "Upload",
        r#"
        <h2>Contribute to the Archive</h2>
        <p>Share your piece of the family story.</p>
        <form id="upload-form">
            <div class="form-group">
                <label for="category">Type of Content</label>
                <select id="category" name="category" required>
                    <option value="letter">Letter</option>
                    <option value="diary_entry">Diary Entry</option>
                    <option value="photo">Photo</option>
                    <option value="audio_recording">Audio Recording</option>
                    <option value="video">Video</option>
                    <option value="news_clipping">News Clipping</option>
                    <option value="anecdote">Anecdote/Story</option>
                    <option value="interview">Interview</option>
                    <option value="document">Document</option>
                    <option value="transcript">Transcript</option>
                </select>
            </div>
            <div class="form-group">
                <label for="title">Title</label>
                <input type="text" id="title" name="title" required
                       placeholder="e.g., Letter from Emma to her mother">
            </div>
            <div class="form-group">
                <label for="description">Brief Description</label>
                <textarea id="description" name="description" rows="3"
                          placeholder="Provide context about this item..."></textarea>
            </div>
            <div class="form-group">
                <label for="body_text">Content/Transcription (if applicable)</label>
                <textarea id="body_text" name="body_text" rows="6"
                          placeholder="Type or paste the full text here..."></textarea>
            </div>
            <div class="form-group">
                <label for="occurred_on">Date (when was this created?)</label>
                <input type="date" id="occurred_on" name="occurred_on">
                <label class="checkbox-label">
                    <input type="checkbox" name="date_is_approximate"> This date is approximate
                </label>
            </div>
            <div class="form-group">
                <label for="file">Upload File (optional)</label>
                <input type="file" id="file" name="file"
                       accept="image/*,audio/*,video/*,.pdf,.doc,.docx,.txt">
            </div>
            <fieldset>
                <legend>Your Information (Optional)</legend>
                <div class="form-group">
                    <label for="contributor_name">Your name</label>
                    <input type="text" id="contributor_name" name="contributor_name">
                </div>
                <div class="form-group">
                    <label for="contributor_email">Your email</label>
                    <input type="email" id="contributor_email" name="contributor_email">
                </div>
                <div class="form-group">
                    <label for="contributor_phone">Your phone number</label>
                    <input type="tel" id="contributor_phone" name="contributor_phone">
                </div>
            </fieldset>
            <button type="submit" id="submit">Submit to Archive</button>
            <div id="message"></div>
        </form>
        <script>
        document.getElementById('upload-form').addEventListener('submit', async e => {
            e.preventDefault();
            const button = document.getElementById('submit');
            const message = document.getElementById('message');
            button.disabled = true;
            message.className = '';
            message.textContent = '';
            try {
                const res = await fetch('/api/uploads', {
                    method: 'POST',
                    body: new FormData(e.target)
                });
                if (!res.ok) {
                    const err = await res.json();
                    throw new Error(err.error.message);
                }
                message.className = 'message success';
                message.textContent = 'Thank you for contributing! Your content has been uploaded.';
                e.target.reset();
            } catch (err) {
                message.className = 'message error';
                message.textContent = 'Error: ' + err.message;
            } finally {
                button.disabled = false;
            }
        });
        </script>
"#,
    )
}

/// Write-a-memory page
async fn write_page() -> impl IntoResponse {
    layout(
        "Write",
        r#"
        <h2>Write a Memory</h2>
        <p>Share your story with the family. Small details make stories
        come alive; don't worry about perfect grammar.</p>
        <form id="write-form">
            <div class="form-group">
                <label for="category">What type of content is this?</label>
                <select id="category" name="category" required>
                    <option value="anecdote">Story/Memory</option>
                    <option value="diary">Diary Entry</option>
                    <option value="letter">Letter</option>
                    <option value="tribute">Tribute</option>
                    <option value="recipe">Recipe</option>
                    <option value="poem">Poem/Song</option>
                </select>
            </div>
            <div class="form-group">
                <label for="title">Give your memory a title</label>
                <input type="text" id="title" name="title" required
                       placeholder="e.g., The Day We Arrived">
            </div>
            <div class="form-group">
                <label for="body_text">Write your memory</label>
                <textarea id="body_text" name="body_text" rows="10" required></textarea>
            </div>
            <div class="form-group">
                <label for="occurred_on">When is this story from?</label>
                <input type="date" id="occurred_on" name="occurred_on">
                <label class="checkbox-label">
                    <input type="checkbox" name="date_is_approximate"> Date is approximate
                </label>
            </div>
            <div class="form-group">
                <label for="location">Where did this happen? (optional)</label>
                <input type="text" id="location" name="location">
            </div>
            <div class="form-group">
                <label for="people_mentioned">People in this story (optional)</label>
                <input type="text" id="people_mentioned" name="people_mentioned">
            </div>
            <fieldset>
                <legend>Your Information (Optional)</legend>
                <div class="form-group">
                    <label for="contributor_name">Your name</label>
                    <input type="text" id="contributor_name" name="contributor_name">
                </div>
                <div class="form-group">
                    <label for="contributor_email">Your email</label>
                    <input type="email" id="contributor_email" name="contributor_email">
                </div>
            </fieldset>
            <button type="submit" id="submit">Submit Memory</button>
            <div id="message"></div>
        </form>
        <script>
        document.getElementById('write-form').addEventListener('submit', async e => {
            e.preventDefault();
            const button = document.getElementById('submit');
            const message = document.getElementById('message');
            button.disabled = true;
            message.className = '';
            message.textContent = '';
            const form = new FormData(e.target);
            const payload = Object.fromEntries(form.entries());
            payload.date_is_approximate = form.get('date_is_approximate') === 'on';
            try {
                const res = await fetch('/api/memories', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify(payload)
                });
                if (!res.ok) {
                    const err = await res.json();
                    throw new Error(err.error.message);
                }
                message.className = 'message success';
                message.textContent = 'Thank you for sharing your memory! It has been submitted.';
                e.target.reset();
            } catch (err) {
                message.className = 'message error';
                message.textContent = 'Error: ' + err.message;
            } finally {
                button.disabled = false;
            }
        });
        </script>
"#,
    )
}

/// Voice recording page
async fn record_page() -> impl IntoResponse {
    layout(
        "Record",
        r#"
        <h2>Record Your Story</h2>
        <p>Find a quiet space, speak at a comfortable pace, and share
        names, dates, and places when you remember them.</p>

        <div class="form-group">
            <button id="start">Start Recording</button>
            <button id="stop" hidden>Stop Recording</button>
            <span id="clock"></span>
        </div>
        <audio id="playback" controls hidden></audio>

        <form id="record-form" hidden>
            <h3>Add Details to Your Recording</h3>
            <div class="form-group">
                <label for="title">Title for your recording</label>
                <input type="text" id="title" name="title"
                       placeholder="e.g., My memories of the old farmhouse">
            </div>
            <div class="form-group">
                <label for="description">Brief description</label>
                <textarea id="description" name="description" rows="3"></textarea>
            </div>
            <div class="form-group">
                <label for="occurred_on">When is this story from?</label>
                <input type="date" id="occurred_on" name="occurred_on">
                <label class="checkbox-label">
                    <input type="checkbox" name="date_is_approximate"> Date is approximate
                </label>
            </div>
            <div class="form-group">
                <label for="contributor_name">Your name (optional)</label>
                <input type="text" id="contributor_name" name="contributor_name">
            </div>
            <button type="submit" id="submit">Upload Recording</button>
            <div id="message"></div>
        </form>
        <script>
        let recorder = null;
        let chunks = [];
        let blob = null;
        let seconds = 0;
        let timer = null;

        const startBtn = document.getElementById('start');
        const stopBtn = document.getElementById('stop');
        const clock = document.getElementById('clock');
        const playback = document.getElementById('playback');
        const form = document.getElementById('record-form');
        const message = document.getElementById('message');

        startBtn.addEventListener('click', async () => {
            try {
                const stream = await navigator.mediaDevices.getUserMedia({ audio: true });
                recorder = new MediaRecorder(stream);
                chunks = [];
                recorder.ondataavailable = e => chunks.push(e.data);
                recorder.onstop = () => {
                    blob = new Blob(chunks, { type: 'audio/webm' });
                    playback.src = URL.createObjectURL(blob);
                    playback.hidden = false;
                    form.hidden = false;
                };
                recorder.start();
                seconds = 0;
                timer = setInterval(() => {
                    seconds += 1;
                    clock.textContent = Math.floor(seconds / 60) + ':'
                        + String(seconds % 60).padStart(2, '0');
                }, 1000);
                startBtn.hidden = true;
                stopBtn.hidden = false;
            } catch (err) {
                message.className = 'message error';
                message.textContent = 'Unable to access microphone. Please check permissions.';
            }
        });

        stopBtn.addEventListener('click', () => {
            recorder.stop();
            recorder.stream.getTracks().forEach(t => t.stop());
            clearInterval(timer);
            startBtn.hidden = false;
            stopBtn.hidden = true;
        });

        form.addEventListener('submit', async e => {
            e.preventDefault();
            if (!blob) {
                message.className = 'message error';
                message.textContent = 'Please record audio first.';
                return;
            }
            const button = document.getElementById('submit');
            button.disabled = true;
            const body = new FormData(e.target);
            body.append('audio', blob);
            body.append('duration_seconds', seconds);
            try {
                const res = await fetch('/api/recordings', { method: 'POST', body });
                if (!res.ok) {
                    const err = await res.json();
                    throw new Error(err.error.message);
                }
                message.className = 'message success';
                message.textContent = 'Your recording has been uploaded successfully!';
                e.target.reset();
                form.hidden = true;
                playback.hidden = true;
                blob = null;
                clock.textContent = '';
            } catch (err) {
                message.className = 'message error';
                message.textContent = 'Error: ' + err.message;
            } finally {
                button.disabled = false;
            }
        });
        </script>
"#,
    )
}
