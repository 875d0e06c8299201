//! Static reminder bodies. Content, not logic; Telegram legacy Markdown.

use chrono::NaiveTime;

use crate::scheduler::policy::Prayer;

/// Morning adkar body, quoting today's sunrise (Syuruk) time when known.
pub fn morning_adkar(sunrise: Option<NaiveTime>) -> String {
    let syuruk = sunrise
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "🌅 *Morning Dhikr*\n\n\
         الْحَمْدُ لِلَّهِ الَّذِي أَحْيَانَا بَعْدَ مَا أَمَاتَنَا وَإِلَيْهِ النُّشُورُ\n\
         _All praise is for Allah who gave us life after causing us to die, and unto Him is the resurrection._\n\n\
         • Set your intention (Niyyah): seek closeness to Allah and purify your heart\n\
         • To Complete Wirdu Amm of the following below:\n  \
         - 100 Istighfar\n  \
         - 500 Salawat upon the Prophet ﷺ\n  \
         - 125 La Ilaha Illallah\n\
         • Upon reciting Wirdu Amm, Recite Surah Yaseen or Quran with tafsir: min. 1 page\n\
         • Remember to pray Solat Ishraq prayers 15-20mins after Syuruk (Today's Syuruk is at: {syuruk})\n\
         • To recite Awrad Zuhooriyah: https://tinyurl.com/awradzuhooriyah\n\
         • Morning supplication for divine help:\n  \
         *Allahumma inni ala zikrika wa shukrika wa husni ibadatika*\n  \
         _(O Allah, help me to remember You, to be grateful to You, and to worship You in an excellent manner)_"
    )
}

pub const EVENING_ADKAR: &str = "🌇 *Evening Adkar Dhikr*\n\n\
• Try to perform prayers in congregation\n\
• Surah Al-Waqi'ah recitation\n\
• Recite Hizbul Bahr\n\
• Perform 1 set of Wird (Istighfar, Tahlil, Salawat, Muraqabah) 10–100x\n\
• Evening charity reminder\n\
• Reflection: pause and feel Allah's presence for 1–2 minutes\n\
• Reminder to finish Wirdu Amm";

pub const SLEEP_ADKAR: &str = "😴 *Before Sleep*\n\n\
• Perform Istighfar, Tahlil, Salawat, Muraqabah: 10–100x\n\
• Reflect on death (Mawt) and your deeds\n\
• Forgive anyone you hold grudges against\n\
• Mindfulness cue: feel gratitude and presence of Allah\n\
• Perform Solat Sunnah Taubah and recite Surah As-Sajdah & Surah Mulk\n\
• Dua: ask Allah for protection, forgiveness, and peaceful rest\n\
• Sleep with good intentions to gain strength to worship and seek Allah's pleasure\n\
• Continuous Dhikr — every breath can be remembrance of Allah";

pub const DHIKR_REMINDER: &str = "💝 *Allahu Allah Reminder*\n\n\
Continuous Dhikr — every breath can be remembrance of Allah:\n\
• Breathe *Allahu Allah* silently and connect your breath to Allah\n\
• Ask Allah for help in maintaining this Dhikr and staying mindful throughout the day\n\
• Renew your intention (Niyyah) with every pause and breath\n\
• Take a deep breath, feel gratitude for Allah's blessings\n\
• Optional: Add a short personal dua from your heart\n\
• Let this Dhikr inspire patience, sincerity, and mindfulness in all actions";

pub fn prayer_soon(prayer: Option<Prayer>) -> String {
    let name = prayer.map(|p| p.name()).unwrap_or("Prayer");
    format!("🔔 {name} prayer in 10 minutes")
}

pub fn prayer_now(prayer: Option<Prayer>) -> String {
    let name = prayer.map(|p| p.name()).unwrap_or("Prayer");
    format!("🕌 {name} prayer time has entered")
}
